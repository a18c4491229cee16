//! # PawMinder Client Library
//!
//! The presentation layer: explicit view state, a pure update function and
//! the stores it reads from and writes to.
//!
//! ## Modules
//!
//! - `config`: Client configuration from the environment
//! - `forms`: Raw form input and its parsing
//! - `render`: Plain-text views
//! - `runtime`: Runs commands against a store
//! - `state`: View state, events, commands and `update`
//! - `store`: Store trait with HTTP and in-memory implementations
//!
//! ## Example
//!
//! ```no_run
//! use pawminder_client::{runtime::Runtime, state::Event, store::MemoryStore, render};
//!
//! # async fn example() {
//! let mut runtime = Runtime::new(MemoryStore::new());
//! runtime.dispatch(Event::Refresh).await;
//!
//! let now = chrono::Local::now().naive_local();
//! println!("{}", render::view(runtime.state(), now));
//! # }
//! ```

pub mod config;
pub mod forms;
pub mod render;
pub mod runtime;
pub mod state;
pub mod store;
