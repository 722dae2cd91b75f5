//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod geom_encoder;
#[cfg(test)]
mod geom_encoder_test;
pub mod tile;
#[cfg(test)]
mod tile_test;
pub mod vector_tile;
