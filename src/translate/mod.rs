pub mod interface;
pub mod client;
pub mod session;
pub mod blocking;
pub mod factory;

pub use interface::{
    DetectionResult, GatewayError, RemoteFailure, TranslateGateway, TranslationOutcome,
};
pub use client::GoogleTranslateClient;
pub use session::{Credentials, LazySession, SessionHandle, SessionSettings};
pub use blocking::BlockingGateway;
pub use factory::GatewayFactory;
