// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: prints, the collage, and the ejection timeline.

pub mod collage;
pub mod drag;
pub mod ejection;
pub mod photo;
