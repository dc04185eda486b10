/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made at the points where a resolve spends its time, to help narrow
down slow or surprising solves.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to backend invocations.
    pub const SOLVE: &str = "solve";

    /// Logs related to the pseudo-boolean encoder.
    pub const ENCODE: &str = "encode";

    /// Logs related to the bisection optimiser.
    pub const MINIMIZE: &str = "minimize";
}
