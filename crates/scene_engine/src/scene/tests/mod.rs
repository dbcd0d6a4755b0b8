//! Scene-level integration tests

mod scene_lifecycle;
