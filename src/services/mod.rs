// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregation;
pub mod ids;
pub mod schedule;
pub mod session;
pub mod stress;
pub mod users;

pub use schedule::{NewBreakSchedule, ScheduleService};
pub use session::{NoSession, SessionAccessor, StoredSession};
pub use stress::StressRepository;
pub use users::UserService;
