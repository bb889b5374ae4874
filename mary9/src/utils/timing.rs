#[cfg(test)]
#[path = "../../tests/unit/utils/timing_test.rs"]
mod timing_test;

/// Implements performance timer functionality, mostly exists due to problem
/// with `Instant` on wasm32 arch.
pub type Timer = actual::Timer;

#[cfg(not(target_arch = "wasm32"))]
mod actual {
    use std::time::Instant;

    /// Measures time elapsed since start.
    #[derive(Clone)]
    pub struct Timer {
        start: Instant,
    }

    impl Timer {
        /// Starts a new timer.
        pub fn start() -> Self {
            Self { start: Instant::now() }
        }

        /// Returns elapsed time in milliseconds.
        pub fn elapsed_millis(&self) -> u128 {
            self.start.elapsed().as_millis()
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod actual {
    use crate::utils::Float;

    /// Measures time elapsed since start.
    #[derive(Clone)]
    pub struct Timer {
        start: Float,
    }

    impl Timer {
        /// Starts a new timer.
        pub fn start() -> Self {
            Self { start: now() }
        }

        /// Returns elapsed time in milliseconds.
        pub fn elapsed_millis(&self) -> u128 {
            (now() - self.start).max(0.) as u128
        }
    }

    fn now() -> Float {
        js_sys::Date::new_0().get_time() as Float
    }
}
