// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod client_test;
pub mod collect_sources_test;
pub mod collect_test;
pub mod helpers;
pub mod materials_test;
