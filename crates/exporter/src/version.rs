// Copyright 2024 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Build metadata captured by `shadow-rs` at compile time.

use const_str::concat;

shadow_rs::shadow!(build);

/// Tag, short commit or crate version, whichever is most specific.
#[allow(clippy::const_is_empty)]
pub const SHORT_VERSION: &str = {
    if !build::TAG.is_empty() {
        build::TAG
    } else if !build::SHORT_COMMIT.is_empty() {
        concat!(build::PKG_VERSION, "@", build::SHORT_COMMIT)
    } else {
        build::PKG_VERSION
    }
};

pub const LONG_VERSION: &str = concat!(
    concat!(SHORT_VERSION, "\n"),
    concat!("build time   : ", build::BUILD_TIME, "\n"),
    concat!("build profile: ", build::BUILD_RUST_CHANNEL, "\n"),
    concat!("build os     : ", build::BUILD_OS, "\n"),
    concat!("rust version : ", build::RUST_VERSION, "\n"),
    concat!("git branch   : ", build::BRANCH, "\n"),
    concat!("git commit   : ", build::COMMIT_HASH, "\n"),
);

/// Crate version as written in `Cargo.toml`.
pub const VERSION: &str = build::PKG_VERSION;
/// Full commit hash, empty outside a git checkout.
pub const REVISION: &str = build::COMMIT_HASH;
pub const BRANCH: &str = build::BRANCH;
pub const RUST_VERSION: &str = build::RUST_VERSION;
