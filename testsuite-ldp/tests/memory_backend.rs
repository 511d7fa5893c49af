//! Conformance run against the in-memory quad store.

use arbor_resource::{ActivityStreamSerializer, QuadResourceService, Session};
use arbor_store::MemoryQuadStore;
use std::sync::Arc;

fn service() -> QuadResourceService {
    QuadResourceService::new(Arc::new(MemoryQuadStore::new()))
        .with_event_serializer(Arc::new(ActivityStreamSerializer::new()))
}

fn session() -> Session {
    Session::new(arbor_model::Iri::new("https://example.com/agent/tester"))
}

#[tokio::test]
async fn missing_before_any_operation() {
    testsuite_ldp::missing_before_any_operation(&service(), &session()).await;
}

#[tokio::test]
async fn create_resource() {
    testsuite_ldp::create_resource(&service(), &session()).await;
}

#[tokio::test]
async fn replace_resource() {
    testsuite_ldp::replace_resource(&service(), &session()).await;
}

#[tokio::test]
async fn delete_resource() {
    testsuite_ldp::delete_resource(&service(), &session()).await;
}

#[tokio::test]
async fn add_immutable_data() {
    testsuite_ldp::add_immutable_data(&service(), &session()).await;
}

#[tokio::test]
async fn rdf_source() {
    testsuite_ldp::rdf_source(&service(), &session()).await;
}

#[tokio::test]
async fn non_rdf_source() {
    testsuite_ldp::non_rdf_source(&service(), &session()).await;
}

#[tokio::test]
async fn container() {
    testsuite_ldp::container(&service(), &session()).await;
}

#[tokio::test]
async fn basic_container() {
    testsuite_ldp::basic_container(&service(), &session()).await;
}

#[tokio::test]
async fn direct_container() {
    testsuite_ldp::direct_container(&service(), &session()).await;
}

#[tokio::test]
async fn direct_container_forward_membership() {
    testsuite_ldp::direct_container_forward_membership(&service(), &session()).await;
}

#[tokio::test]
async fn indirect_container() {
    testsuite_ldp::indirect_container(&service(), &session()).await;
}

#[tokio::test]
async fn touch_resource() {
    testsuite_ldp::touch_resource(&service(), &session()).await;
}

#[tokio::test]
async fn identifier_generation() {
    testsuite_ldp::identifier_generation(&service());
}
