#![no_std]

//! Rectangle copies, color-depth conversion and flood fill for 8, 15, 16,
//! 24 and 32-bit bitmaps stored in linear memory, in banked video memory
//! or in mode-X planes.

extern crate alloc;

// Lets the palette macros refer to this crate by name from inside it.
extern crate self as vgablit;

pub mod bank;
pub mod bestfit;
pub mod bitmap;
pub mod blit;
pub mod clip;
pub mod color;
pub mod context;
pub mod convert;
pub mod depth;
pub mod error;
pub mod floodfill;
pub mod pixel;
pub mod quantize;
pub(crate) mod surface;

pub use bank::BankedMemory;
pub use bitmap::Bitmap;
pub use blit::{blit, blit_within, masked_blit};
pub use clip::{clip_blit, BlitRect, ClipRect};
pub use color::{Palette, Rgb, Rgb6};
pub use context::ColorContext;
pub use depth::{ColorDepth, Layout};
pub use error::Error;
pub use floodfill::floodfill;
pub use quantize::generate_optimized_palette;
pub use vgablit_macros::{vga_palette, vga_rgb};
