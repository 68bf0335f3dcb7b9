use bitflags::bitflags;

bitflags! {
    /// Diagnostics and checking performed while creating packages.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BuilderMode: u32 {
        /// Log each package's member inventory.
        const LOG_PACKAGES = 1 << 0;
        /// Log a summary of every function created.
        const LOG_FUNCTIONS = 1 << 1;
        /// Check each created package for internal consistency.
        const SANITY_CHECK_FUNCTIONS = 1 << 2;
    }
}
