//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::Path;

use easel_studio::credentials::{HashMode, JsonFileStore};
use easel_studio::generator::GenerateError;
use easel_studio::history::Artifact;
use image::{DynamicImage, Rgb, RgbImage};

/// Store at `dir/users.json` using the fast deterministic hash
pub fn create_test_store(dir: &Path) -> JsonFileStore {
    JsonFileStore::new(dir.join("users.json")).with_hash_mode(HashMode::Sha256)
}

/// Generator producing a solid image whose width is the prompt length
pub fn solid_generator(prompt: &str) -> Result<Artifact, GenerateError> {
    let width = prompt.chars().count().max(1) as u32;
    Ok(Artifact::new(DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        2,
        Rgb([200, 40, 40]),
    ))))
}
