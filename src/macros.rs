// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Logs at error level and terminates the process with exit status 1.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        ::log::error!($($arg)*);
        ::std::process::exit(1);
    }};
}
