//! Remote quad store speaking the SPARQL 1.1 protocol.
//!
//! We use `reqwest` directly rather than a SPARQL client crate because:
//! 1. The query surface we need is tiny (SELECT, ASK, and three update forms)
//! 2. We control the exact update batching (one request per `Update`, which
//!    is what gives per-identifier atomicity on conforming endpoints)
//! 3. Fewer transitive dependencies
//!
//! Queries are POSTed as `application/sparql-query` and answered as
//! `application/sparql-results+json`; updates are POSTed as
//! `application/sparql-update`.

use crate::binding::Binding;
use crate::error::{Result, StoreError};
use crate::pattern::{GraphPattern, SelectQuery, TermPattern, TriplePattern};
use crate::store::QuadStore;
use crate::update::{Update, UpdateOp};
use arbor_model::{BlankNode, Iri, Literal, Quad, Subject, Term};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Write as _;

/// A quad store backed by a remote SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct SparqlQuadStore {
    client: reqwest::Client,
    /// Query endpoint URL, e.g. `http://127.0.0.1:3030/ds/query`
    query_url: String,
    /// Update endpoint URL, e.g. `http://127.0.0.1:3030/ds/update`
    update_url: String,
}

impl SparqlQuadStore {
    /// Create a new store pointing at explicit query and update endpoints
    pub fn new(query_url: impl Into<String>, update_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            query_url: query_url.into(),
            update_url: update_url.into(),
        }
    }

    /// Create a store with a custom `reqwest::Client` (for timeouts, etc.)
    pub fn with_client(
        client: reqwest::Client,
        query_url: impl Into<String>,
        update_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            query_url: query_url.into(),
            update_url: update_url.into(),
        }
    }

    /// Check if the endpoint is reachable
    pub async fn is_available(&self) -> bool {
        self.run_query("ASK WHERE {}").await.is_ok()
    }

    async fn run_query(&self, query: &str) -> Result<serde_json::Value> {
        tracing::debug!(endpoint = %self.query_url, %query, "dispatching SPARQL query");
        let response = self
            .client
            .post(&self.query_url)
            .header("Content-Type", "application/sparql-query")
            .header("Accept", "application/sparql-results+json")
            .body(query.to_string())
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(StoreError::backend(format!(
                "query failed ({}): {}",
                status, body
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| StoreError::protocol(format!("failed to parse query response: {e}")))
    }

    async fn run_update(&self, update: &str) -> Result<()> {
        tracing::debug!(endpoint = %self.update_url, %update, "dispatching SPARQL update");
        let response = self
            .client
            .post(&self.update_url)
            .header("Content-Type", "application/sparql-update")
            .body(update.to_string())
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(StoreError::backend(format!(
                "update failed ({}): {}",
                status, body
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl QuadStore for SparqlQuadStore {
    async fn insert(&self, quad: Quad) -> Result<()> {
        self.apply(Update::new().insert(vec![quad])).await
    }

    async fn remove(&self, quad: &Quad) -> Result<()> {
        let mut text = String::from("DELETE DATA {\n");
        let _ = writeln!(text, "  GRAPH {} {{", iri_ref(&quad.graph));
        let _ = writeln!(text, "    {}", triple_data(quad));
        text.push_str("  }\n}");
        self.run_update(&text).await
    }

    async fn clear_graph(&self, graph: &Iri) -> Result<()> {
        self.run_update(&format!("CLEAR SILENT GRAPH {}", iri_ref(graph)))
            .await
    }

    async fn apply(&self, update: Update) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }
        self.run_update(&render_update(&update)).await
    }

    async fn select(&self, query: &SelectQuery) -> Result<Vec<Binding>> {
        let value = self.run_query(&render_select(query)).await?;
        parse_select(value)
    }

    async fn ask(&self, pattern: &GraphPattern) -> Result<bool> {
        let mut text = String::from("ASK WHERE {\n");
        render_graph_pattern(&mut text, pattern, "  ");
        text.push('}');
        let value = self.run_query(&text).await?;
        value
            .get("boolean")
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| StoreError::protocol("ASK response missing boolean".to_string()))
    }
}

// ============================================================================
// Query rendering
// ============================================================================

fn iri_ref(iri: &Iri) -> String {
    format!("<{}>", iri.as_str())
}

fn literal_ref(lit: &Literal) -> String {
    let escaped = lit
        .lexical
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    if let Some(lang) = &lit.language {
        format!("\"{escaped}\"@{lang}")
    } else if let Some(dt) = &lit.datatype {
        format!("\"{escaped}\"^^<{dt}>")
    } else {
        format!("\"{escaped}\"")
    }
}

fn term_ref(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri_ref(iri),
        Term::Literal(lit) => literal_ref(lit),
        Term::Blank(b) => format!("_:{}", b.label()),
    }
}

fn pattern_ref(pattern: &TermPattern) -> String {
    match pattern {
        TermPattern::Var(v) => format!("?{}", v.name()),
        TermPattern::Iri(iri) => iri_ref(iri),
        TermPattern::Literal(lit) => literal_ref(lit),
        TermPattern::Blank(b) => format!("_:{}", b.label()),
    }
}

fn triple_ref(triple: &TriplePattern) -> String {
    format!(
        "{} {} {} .",
        pattern_ref(&triple.subject),
        pattern_ref(&triple.predicate),
        pattern_ref(&triple.object)
    )
}

fn triple_data(quad: &Quad) -> String {
    let subject = match &quad.subject {
        Subject::Iri(iri) => iri_ref(iri),
        Subject::Blank(b) => format!("_:{}", b.label()),
    };
    format!(
        "{} {} {} .",
        subject,
        iri_ref(&quad.predicate),
        term_ref(&quad.object)
    )
}

fn render_graph_pattern(out: &mut String, pattern: &GraphPattern, indent: &str) {
    let _ = writeln!(out, "{indent}GRAPH {} {{", pattern_ref(&pattern.graph));
    for triple in &pattern.triples {
        let _ = writeln!(out, "{indent}  {}", triple_ref(triple));
    }
    let _ = writeln!(out, "{indent}}}");
}

/// Render a `SelectQuery` as SPARQL text.
pub fn render_select(query: &SelectQuery) -> String {
    let mut text = String::from("SELECT");
    if query.select.is_empty() {
        text.push_str(" *");
    } else {
        for var in &query.select {
            let _ = write!(text, " ?{}", var.name());
        }
    }
    text.push_str(" WHERE {\n");
    for pattern in &query.patterns {
        render_graph_pattern(&mut text, pattern, "  ");
    }
    for optional in &query.optionals {
        text.push_str("  OPTIONAL {\n");
        render_graph_pattern(&mut text, optional, "    ");
        text.push_str("  }\n");
    }
    text.push('}');
    text
}

/// Render an `Update` batch as one SPARQL update request.
pub fn render_update(update: &Update) -> String {
    let mut parts = Vec::with_capacity(update.ops.len());
    for (i, op) in update.ops.iter().enumerate() {
        match op {
            UpdateOp::ClearGraph(graph) => {
                parts.push(format!("CLEAR SILENT GRAPH {}", iri_ref(graph)));
            }
            UpdateOp::DeleteWhere {
                graph,
                subject,
                predicate,
            } => {
                let subject = match subject {
                    Subject::Iri(iri) => iri_ref(iri),
                    Subject::Blank(b) => format!("_:{}", b.label()),
                };
                // Distinct variable names per operation keep the request
                // well-formed when several delete-wheres are batched.
                let row = match predicate {
                    Some(p) => format!("{} {} ?o{}", subject, iri_ref(p), i),
                    None => format!("{} ?p{} ?o{}", subject, i, i),
                };
                parts.push(format!(
                    "DELETE WHERE {{ GRAPH {} {{ {} }} }}",
                    iri_ref(graph),
                    row
                ));
            }
            UpdateOp::InsertData(quads) => {
                let mut text = String::from("INSERT DATA {\n");
                for quad in quads {
                    let _ = writeln!(
                        text,
                        "  GRAPH {} {{ {} }}",
                        iri_ref(&quad.graph),
                        triple_data(quad)
                    );
                }
                text.push('}');
                parts.push(text);
            }
        }
    }
    parts.join(" ;\n")
}

// ============================================================================
// Result parsing
// ============================================================================

fn parse_select(value: serde_json::Value) -> Result<Vec<Binding>> {
    let response: SelectResponse = serde_json::from_value(value)
        .map_err(|e| StoreError::protocol(format!("malformed SELECT response: {e}")))?;
    response
        .results
        .bindings
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(name, term)| Ok((crate::pattern::Variable::new(name), term.into_term()?)))
                .collect::<Result<Binding>>()
        })
        .collect()
}

#[derive(Debug, serde::Deserialize)]
struct SelectResponse {
    results: SelectResults,
}

#[derive(Debug, serde::Deserialize)]
struct SelectResults {
    bindings: Vec<HashMap<String, ResultTerm>>,
}

/// One RDF term in a SPARQL JSON results document.
#[derive(Debug, serde::Deserialize)]
struct ResultTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default)]
    datatype: Option<String>,
    #[serde(default, rename = "xml:lang")]
    lang: Option<String>,
}

impl ResultTerm {
    fn into_term(self) -> Result<Term> {
        match self.kind.as_str() {
            "uri" => Ok(Term::Iri(Iri::new(self.value))),
            "literal" | "typed-literal" => {
                let mut literal = Literal::simple(self.value);
                literal.datatype = self.datatype.map(Iri::new);
                literal.language = self.lang;
                Ok(Term::Literal(literal))
            }
            "bnode" => Ok(Term::Blank(BlankNode::new(self.value))),
            other => Err(StoreError::protocol(format!(
                "unknown term type in results: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Variable;

    fn iri(s: &str) -> Iri {
        Iri::new(s)
    }

    #[test]
    fn test_render_select_with_optional() {
        let p = Variable::new("p");
        let o = Variable::new("o");
        let bs = Variable::new("bs");
        let query = SelectQuery::new()
            .select([p.clone(), o.clone(), bs.clone()])
            .pattern(GraphPattern::named(
                iri("http://g/server"),
                vec![TriplePattern::new(iri("http://r/1"), p, o)],
            ))
            .optional(GraphPattern::named(
                iri("http://g/server"),
                vec![TriplePattern::new(iri("http://r/1"), iri("http://p/hasPart"), bs)],
            ));
        let text = render_select(&query);
        assert!(text.starts_with("SELECT ?p ?o ?bs WHERE {"));
        assert!(text.contains("GRAPH <http://g/server> {"));
        assert!(text.contains("<http://r/1> ?p ?o ."));
        assert!(text.contains("OPTIONAL {"));
        assert!(text.contains("<http://r/1> <http://p/hasPart> ?bs ."));
    }

    #[test]
    fn test_render_select_star() {
        let query = SelectQuery::new().pattern(GraphPattern::var_graph(
            Variable::new("g"),
            vec![TriplePattern::new(
                Variable::new("s"),
                Variable::new("p"),
                Variable::new("o"),
            )],
        ));
        let text = render_select(&query);
        assert!(text.starts_with("SELECT * WHERE {"));
        assert!(text.contains("GRAPH ?g {"));
    }

    #[test]
    fn test_render_update_batch() {
        let update = Update::new()
            .clear_graph(iri("http://r/1"))
            .delete_subject(iri("http://g/server"), iri("http://r/1"))
            .insert(vec![Quad::new(
                iri("http://r/1"),
                iri("http://r/1"),
                iri("http://p/title"),
                Literal::simple("a \"quoted\" title"),
            )]);
        let text = render_update(&update);
        let parts: Vec<&str> = text.split(" ;\n").collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "CLEAR SILENT GRAPH <http://r/1>");
        assert_eq!(
            parts[1],
            "DELETE WHERE { GRAPH <http://g/server> { <http://r/1> ?p1 ?o1 } }"
        );
        assert!(parts[2].contains("INSERT DATA {"));
        assert!(parts[2].contains("\"a \\\"quoted\\\" title\""));
    }

    #[test]
    fn test_render_delete_where_with_predicate() {
        let update = Update::new().delete_predicate(
            iri("http://g/server"),
            iri("http://r/1"),
            iri("http://p/modified"),
        );
        let text = render_update(&update);
        assert_eq!(
            text,
            "DELETE WHERE { GRAPH <http://g/server> { <http://r/1> <http://p/modified> ?o0 } }"
        );
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(literal_ref(&Literal::simple("plain")), "\"plain\"");
        assert_eq!(literal_ref(&Literal::tagged("salut", "fr")), "\"salut\"@fr");
        assert_eq!(
            literal_ref(&Literal::typed("5", arbor_vocab::xsd::LONG)),
            "\"5\"^^<http://www.w3.org/2001/XMLSchema#long>"
        );
        assert_eq!(literal_ref(&Literal::simple("line\nbreak")), "\"line\\nbreak\"");
    }

    #[test]
    fn test_parse_select_results() {
        let body = serde_json::json!({
            "head": { "vars": ["s", "o"] },
            "results": { "bindings": [
                {
                    "s": { "type": "uri", "value": "http://r/1" },
                    "o": { "type": "literal", "value": "hello", "xml:lang": "en" }
                },
                {
                    "s": { "type": "bnode", "value": "b0" }
                }
            ]}
        });
        let rows = parse_select(body).unwrap();
        assert_eq!(rows.len(), 2);
        let s = Variable::new("s");
        let o = Variable::new("o");
        assert_eq!(rows[0].get(&s), Some(&Term::Iri(Iri::new("http://r/1"))));
        assert_eq!(
            rows[0].get(&o),
            Some(&Term::Literal(Literal::tagged("hello", "en")))
        );
        assert!(rows[1].get(&o).is_none());
        assert_eq!(rows[1].get(&s), Some(&Term::Blank(BlankNode::new("b0"))));
    }

    #[test]
    fn test_parse_select_rejects_garbage() {
        assert!(parse_select(serde_json::json!({"nope": true})).is_err());
    }
}
