// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layered errors for service backends.
//!
//! This facade re-exports the workspace crates:
//!
//! - [`error`]: the taxonomy, code constants, and factory;
//! - [`validate`]: fail-fast field validation;
//! - [`protocol`]: HTTP, gRPC, SOAP, and GraphQL translators;
//! - [`config`]: TOML overrides and logging setup.
//!
//! ```
//! use stratum::error::{Details, codes, not_found_error};
//! use stratum::protocol::{HttpTranslator, ProtocolTranslator};
//!
//! let err = not_found_error(codes::USER_NOT_FOUND, "no such user", Details::new());
//! assert_eq!(HttpTranslator::new().translate_native(&err).http_status, 404);
//! ```
#![deny(unsafe_code)]

pub use stratum_config as config;
pub use stratum_error as error;
pub use stratum_protocol as protocol;
pub use stratum_validate as validate;

pub use stratum_error::{ErrorCode, ErrorType, LayerError, LayerType, LayeredError};
pub use stratum_protocol::ProtocolTranslator;
pub use stratum_validate::{Field, Rule};
