// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end CLI specs for the `wp` binary.
//!
//! The test files under `cli/` are wired into the waypoint crate as
//! `[[test]]` targets so they run against the compiled binary; this stub
//! library only anchors the package.
