// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for captured prints.

pub mod export;
pub mod snapshot;
