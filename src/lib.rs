//! inject-tag - custom struct tags for generated Go protobuf code
//!
//! protoc-gen-go owns the struct tags of the files it generates, so hand
//! edits are lost on every regeneration. inject-tag rewrites the tags of
//! generated `.pb.go` files from directives kept in the `.proto` comments:
//!
//! ```text
//! // @inject_tag: validate:"required"
//! Name string `protobuf:"bytes,1,opt,name=name,proto3" json:"name,omitempty"`
//! ```
//!
//! becomes
//!
//! ```text
//! Name string `protobuf:"bytes,1,opt,name=name,proto3" json:"name,omitempty" validate:"required"`
//! ```
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and run options
//! - `core`: Parsing, directive extraction and byte rewriting
//! - `directives`: The `@inject_tag` comment grammar
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod directives;
pub mod utils;
