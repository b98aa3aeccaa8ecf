// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod mouse;
pub mod session;
pub mod viewport;

pub use mouse::{Drag, Mouse, MouseButton, MouseDelegate, MouseEvent};
pub use session::DeformationSession;
pub use viewport::ViewPort;
