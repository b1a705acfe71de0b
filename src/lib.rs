//! Rendering hardware interface with reference-counted resource lifetimes.
//!
//! The API is device-centric: a [`GfxApi`] owns one [`DeviceContext`], and
//! every resource is created through the device's factory methods. Resource
//! handles are cheap clones; cloning adds a reference, dropping removes
//! one, and the backing object is reclaimed a few frames after the last
//! reference goes away so nothing in flight can still address it.
//!
//! Rendering work is recorded into a [`CommandBuffer`] up front and
//! replayed by [`DeviceContext::submit_command_buffer`] in insertion
//! order. The crate ships a software reference backend that interprets
//! replay on the CPU, which keeps the full binding and lifetime contract
//! observable in tests.
//!
//! Creation-time misuse of the API (wrong usage flags, out-of-range
//! indices, mismatched stage sets) asserts. Conditions the caller cannot
//! rule out up front, like capability gaps or id-space exhaustion, come
//! back as [`GfxError`].

// BEGIN - Ember lints v0.3
// do not change or add/remove here, but one can add exceptions after this
// section
#![deny(unsafe_code)]
#![warn(
    clippy::all,
    clippy::await_holding_lock,
    clippy::char_lit_as_u8,
    clippy::checked_conversions,
    clippy::dbg_macro,
    clippy::debug_assert_with_mut_call,
    clippy::doc_markdown,
    clippy::empty_enum,
    clippy::enum_glob_use,
    clippy::exit,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_deref_methods,
    clippy::explicit_into_iter_loop,
    clippy::fallible_impl_from,
    clippy::filter_map_next,
    clippy::float_cmp_const,
    clippy::fn_params_excessive_bools,
    clippy::if_let_mutex,
    clippy::implicit_clone,
    clippy::imprecise_flops,
    clippy::inefficient_to_string,
    clippy::invalid_upcast_comparisons,
    clippy::large_types_passed_by_value,
    clippy::let_unit_value,
    clippy::linkedlist,
    clippy::lossy_float_literal,
    clippy::macro_use_imports,
    clippy::manual_ok_or,
    clippy::map_err_ignore,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::match_on_vec_items,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mem_forget,
    clippy::mismatched_target_os,
    clippy::mut_mut,
    clippy::mutex_integer,
    clippy::needless_borrow,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::path_buf_push_overwrite,
    clippy::ptr_as_ptr,
    clippy::ref_option_ref,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_functions_in_if_condition,
    clippy::semicolon_if_nothing_returned,
    clippy::string_add_assign,
    clippy::string_add,
    clippy::string_lit_as_bytes,
    clippy::string_to_string,
    clippy::todo,
    clippy::trait_duplication_in_bounds,
    clippy::unimplemented,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::useless_transmute,
    clippy::verbose_file_reads,
    clippy::zero_sized_map_values,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms
)]
// END - Ember lints v0.3
// crate-specific exceptions:
#![allow(
    unsafe_code,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::new_without_default
)]

pub mod api;
pub use api::*;

pub mod buffer;
pub use buffer::*;

pub mod command_buffer;
pub use command_buffer::*;

pub mod device_context;
pub use device_context::*;

pub mod error;
pub use error::*;

pub mod framebuffer;
pub use framebuffer::*;

pub mod pipeline;
pub use pipeline::*;

pub mod query;
pub use query::*;

pub mod render_pass;
pub use render_pass::*;

pub mod resource_group;
pub use resource_group::*;

pub mod root_signature;
pub use root_signature::*;

pub mod sampler;
pub use sampler::*;

pub mod shader;
pub use shader::*;

pub mod shader_module;
pub use shader_module::*;

pub mod swapchain;
pub use swapchain::*;

pub mod texture;
pub use texture::*;

pub mod types;
pub use types::*;

pub mod vertex_array;
pub use vertex_array::*;

mod backends;
mod deferred_drop;
mod handle_pool;

/// The color attachment slot count every backend must provide.
pub const MAX_RENDER_TARGET_ATTACHMENTS: usize = 8;
/// Vertex buffer slots addressable by a vertex layout.
pub const MAX_VERTEX_INPUT_BINDINGS: usize = 16;
/// Hard ceiling on patch-list control points; devices may report less.
pub const MAX_PATCH_CONTROL_POINTS: u8 = 32;
