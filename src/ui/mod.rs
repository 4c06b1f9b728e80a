// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the instant camera.

pub mod camera_body;
pub mod notice;
pub mod pointer;
pub mod print;

use crate::models::photo::Point;

pub fn to_pos(point: Point) -> egui::Pos2 {
    egui::pos2(point.x, point.y)
}

pub fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}
