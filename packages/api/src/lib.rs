//! # API crate: Posifeed client core
//!
//! Everything the pages need that is not markup lives here: the HTTP client,
//! the data sources, the session state machine and the pure derivations the
//! pages render from.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `ApiClient`: base URL, bearer token, JSON in and out, error mapping |
//! | [`config`] | Base URL and data-source selection |
//! | [`source`] | `DataSource` trait with live and fixture implementations |
//! | [`fixtures`] | Sample data used by the fixture source |
//! | [`auth`] | Session restore, login, logout and the `AuthState` machine |
//! | [`filter`] | Category and time-window filtering of feedback lists |
//! | [`inbox`] | Optimistic mark-as-read for received feedback |
//! | [`directory`] | Search and facet filtering of the user directory |
//! | [`validation`] | Per-field validation of the app's forms |
//! | [`dashboard`] | Headline figures for the dashboard |
//! | [`models`] | Wire types |

pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod directory;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod inbox;
pub mod models;
pub mod source;
pub mod validation;

pub use auth::{AuthState, AuthStore};
pub use client::{ApiClient, FeedbackQuery, RequestOptions};
pub use config::{ApiConfig, SourceKind};
pub use error::ApiError;
pub use filter::{CategoryFilter, FeedbackFilter, TimeWindow};
pub use source::{DataSource, FixtureSource, LiveSource, Source};
