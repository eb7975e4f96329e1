//! PDA Tools module
//!
//! Tool implementations shared by the MCP server and the command line.

pub mod analysis;
pub mod food_list;
pub mod reports;
pub mod status;
