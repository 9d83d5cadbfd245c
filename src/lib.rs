pub mod budget;
pub mod clients;
pub mod config;
pub mod enhance;
pub mod error;
pub mod export;
pub mod input;
pub mod normalize;
pub mod prompts;
pub mod proposal;
pub mod sections;
pub mod templates;
pub mod timeline;

pub use clients::{AiProvider, ProviderKind};
pub use config::Config;
pub use error::{ProposalError, ProviderError, Result};
pub use input::RawInput;
pub use proposal::{ProposalAssembler, ProposalPayload};
