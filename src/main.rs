// Copyright 2025 the Cagewarp Authors
// SPDX-License-Identifier: Apache-2.0

//! Cagewarp command-line front end

fn main() -> anyhow::Result<()> {
    cagewarp::run()
}
