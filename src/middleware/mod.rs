// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (CORS, security headers).

pub mod cors;
pub mod security;

pub use cors::cors_layer;
pub use security::add_security_headers;
