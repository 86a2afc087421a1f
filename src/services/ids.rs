// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document id generation.
//!
//! Ids are `<prefix>_<unix millis>_<7 base36 chars>` (stress entries,
//! schedules) or `<prefix>_<7 base36 chars>` (users). The random suffix only
//! has to make collisions unlikely within one collection; the store rejects
//! the rare duplicate.

use crate::error::AppError;
use chrono::Utc;
use ring::rand::{SecureRandom, SystemRandom};

const SUFFIX_LEN: usize = 7;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase base36 string of `len` characters.
pub fn random_base36(len: usize) -> Result<String, AppError> {
    let mut bytes = vec![0u8; len];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG unavailable")))?;
    Ok(bytes
        .iter()
        .map(|b| char::from(BASE36[usize::from(*b) % BASE36.len()]))
        .collect())
}

/// Timestamped id such as `stress_1709285400000_k3j9x0a`.
pub fn timestamped_id(prefix: &str) -> Result<String, AppError> {
    Ok(format!(
        "{}_{}_{}",
        prefix,
        Utc::now().timestamp_millis(),
        random_base36(SUFFIX_LEN)?
    ))
}

/// Short id such as `user_k3j9x0a`.
pub fn short_id(prefix: &str) -> Result<String, AppError> {
    Ok(format!("{}_{}", prefix, random_base36(SUFFIX_LEN)?))
}
