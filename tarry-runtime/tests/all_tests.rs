// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod common;

#[cfg(feature = "runtime-smol")]
mod smol_runtime_tests {
    use tarry_runtime::SmolRuntime;

    crate::runtime_suite!(SmolRuntime);
}

#[cfg(feature = "runtime-tokio")]
mod tokio_runtime_tests {
    use tarry_runtime::TokioRuntime;

    crate::runtime_suite!(TokioRuntime::new()?);
}
