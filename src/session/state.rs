//! Session lifecycle states.

crate::state_enum! {
    /// Phases of one client session.
    ///
    /// The usual path is `NotRunning → Running → Connected → Ping → Done`.
    /// That path is a convention of the session handlers; the dispatcher
    /// accepts any order.
    pub enum SessionState {
        /// Created, nothing requested yet
        NotRunning,
        /// Started; the transport connect is scheduled
        Running,
        /// Transport reported the connection open
        Connected,
        /// Identification sent
        Ping,
        /// Reserved for a server reply; handled as a no-op
        Pong,
        /// Transport closed
        Done,
    }
    lifecycle: NotRunning => Running
}
