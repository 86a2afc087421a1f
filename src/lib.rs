// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! MindEase: personal stress tracking
//!
//! This crate provides the backend API for logging self-reported stress
//! entries, aggregating them into dashboard, chart and calendar views, and
//! serving canned recommendations. Data lives in a small local document
//! store (one JSON array per collection).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Storage;
use services::{ScheduleService, StressRepository, UserService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub storage: Storage,
    pub stress: StressRepository,
    pub users: UserService,
    pub schedules: ScheduleService,
}

impl AppState {
    pub fn new(config: Config, storage: Storage) -> Self {
        Self {
            config,
            stress: StressRepository::new(storage.clone()),
            users: UserService::new(storage.clone()),
            schedules: ScheduleService::new(storage.clone()),
            storage,
        }
    }
}
