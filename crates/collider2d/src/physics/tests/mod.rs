//! Integration tests for colliders running inside a world and manager

mod circle_scenarios;
mod collision_step;
