//! Remote side of EKA: the HTTP implementation of
//! [`eka_core::gateway::KnowledgeGateway`].

pub mod http_gateway;

pub use http_gateway::HttpKnowledgeGateway;
