//! # agent-core
//!
//! The contract between an agent host and the capabilities it can call.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ToolCall    ┌──────────────┐   execute   ┌──────────┐
//! │  Agent host  │──────────────▶│ ToolRegistry │────────────▶│  Tool    │
//! │ (LLM / HTTP) │◀──────────────│  name → tool │◀────────────│  impl    │
//! └──────────────┘  ToolResult   └──────────────┘             └──────────┘
//! ```
//!
//! A host never sees an error from [`ToolRegistry::dispatch`]: every problem
//! comes back as a failure [`ToolResult`] carrying a readable message.

pub mod tool;
pub mod error;

pub use error::{AgentError, Result};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolRegistry, ToolSchema};
