//! Decision state machine.
//!
//! A `StateMachine` drives a builder through named states. Each state has
//! an optional arrival callback (run when the state is entered) and an
//! optional transition callback (run on input, returns the next state).
//! A state without a transition is terminal.
//!
//! Callbacks are plain `fn` pointers over an owner context `C` handed to
//! [`StateMachine::pump`], so the machine holds no references into the
//! builder that owns it.
//!
//! ## Driving
//!
//! - The first `pump` makes the start state current and runs its
//!   transition with the input.
//! - A transition that fails leaves the current state unchanged.
//! - Once a terminal state is reached, every further `pump` fails.
//!
//! ```
//! use gtr_engine::core::DecisionError;
//! use gtr_engine::fsm::StateMachine;
//!
//! #[derive(Default)]
//! struct Counter {
//!     picks: Vec<usize>,
//! }
//!
//! fn pick(c: &mut Counter, input: usize) -> Result<&'static str, DecisionError> {
//!     c.picks.push(input);
//!     Ok("DONE")
//! }
//!
//! let mut fsm: StateMachine<Counter> = StateMachine::new();
//! fsm.add_state("PICK", None, Some(pick), false).unwrap();
//! fsm.add_state("DONE", None, None, true).unwrap();
//! fsm.set_start("PICK").unwrap();
//!
//! let mut counter = Counter::default();
//! fsm.pump(&mut counter, 4).unwrap();
//! assert_eq!(fsm.current(), Some("DONE"));
//! assert!(fsm.pump(&mut counter, 0).is_err());
//! ```

use rustc_hash::FxHashMap;

use crate::core::DecisionError;

/// Callback run when a state is entered.
pub type Arrival<C> = fn(&mut C);

/// Callback run on input; returns the name of the next state.
pub type Transition<C> = fn(&mut C, usize) -> Result<&'static str, DecisionError>;

struct StateEntry<C> {
    arrival: Option<Arrival<C>>,
    transition: Option<Transition<C>>,
    terminal: bool,
}

/// Named-state machine over an owner context `C`.
pub struct StateMachine<C> {
    states: FxHashMap<&'static str, StateEntry<C>>,
    start: Option<&'static str>,
    current: Option<&'static str>,
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self {
            states: FxHashMap::default(),
            start: None,
            current: None,
        }
    }
}

impl<C> std::fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states.len())
            .field("start", &self.start)
            .field("current", &self.current)
            .finish()
    }
}

impl<C> StateMachine<C> {
    /// Create an empty machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state.
    pub fn add_state(
        &mut self,
        name: &'static str,
        arrival: Option<Arrival<C>>,
        transition: Option<Transition<C>>,
        terminal: bool,
    ) -> Result<(), DecisionError> {
        if self.states.contains_key(name) {
            return Err(DecisionError::DuplicateState(name));
        }
        self.states.insert(
            name,
            StateEntry {
                arrival,
                transition,
                terminal,
            },
        );
        Ok(())
    }

    /// Choose the state the first pump starts from.
    pub fn set_start(&mut self, name: &'static str) -> Result<(), DecisionError> {
        if !self.states.contains_key(name) {
            return Err(DecisionError::UnknownState(name));
        }
        self.start = Some(name);
        Ok(())
    }

    /// Current state, `None` before the first pump.
    #[must_use]
    pub fn current(&self) -> Option<&'static str> {
        self.current
    }

    /// Whether the machine sits in a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current
            .and_then(|name| self.states.get(name))
            .is_some_and(|entry| entry.terminal || entry.transition.is_none())
    }

    /// Feed one input to the current state.
    pub fn pump(&mut self, ctx: &mut C, input: usize) -> Result<(), DecisionError> {
        let current = match self.current.or(self.start) {
            Some(name) => name,
            None => return Err(DecisionError::InvalidOperation("no start state set")),
        };

        let entry = self
            .states
            .get(current)
            .ok_or(DecisionError::UnknownState(current))?;
        if entry.terminal {
            return Err(DecisionError::InvalidOperation("machine already finished"));
        }
        let transition = entry
            .transition
            .ok_or(DecisionError::InvalidOperation("state has no transition"))?;

        let next = transition(ctx, input)?;
        let arrival = self
            .states
            .get(next)
            .ok_or(DecisionError::UnknownState(next))?
            .arrival;

        tracing::trace!(from = current, to = next, input, "state transition");
        self.current = Some(next);
        if let Some(arrive) = arrival {
            arrive(ctx);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Trace {
        arrivals: Vec<&'static str>,
        inputs: Vec<usize>,
    }

    fn start(t: &mut Trace, input: usize) -> Result<&'static str, DecisionError> {
        t.inputs.push(input);
        Ok("MIDDLE")
    }

    fn middle_arrival(t: &mut Trace) {
        t.arrivals.push("MIDDLE");
    }

    fn middle(t: &mut Trace, input: usize) -> Result<&'static str, DecisionError> {
        if input > 1 {
            return Err(DecisionError::InvalidChoice { index: input, len: 2 });
        }
        t.inputs.push(input);
        Ok("FINISHED")
    }

    fn finished_arrival(t: &mut Trace) {
        t.arrivals.push("FINISHED");
    }

    fn to_nowhere(_: &mut Trace, _: usize) -> Result<&'static str, DecisionError> {
        Ok("NOWHERE")
    }

    fn machine() -> StateMachine<Trace> {
        let mut fsm = StateMachine::new();
        fsm.add_state("START", None, Some(start), false).unwrap();
        fsm.add_state("MIDDLE", Some(middle_arrival), Some(middle), false)
            .unwrap();
        fsm.add_state("FINISHED", Some(finished_arrival), None, true)
            .unwrap();
        fsm.set_start("START").unwrap();
        fsm
    }

    #[test]
    fn test_first_pump_runs_start_transition() {
        let mut fsm = machine();
        let mut trace = Trace::default();

        assert_eq!(fsm.current(), None);
        fsm.pump(&mut trace, 0).unwrap();

        assert_eq!(fsm.current(), Some("MIDDLE"));
        assert_eq!(trace.arrivals, vec!["MIDDLE"]);
        assert_eq!(trace.inputs, vec![0]);
    }

    #[test]
    fn test_rejected_input_keeps_state() {
        let mut fsm = machine();
        let mut trace = Trace::default();
        fsm.pump(&mut trace, 0).unwrap();

        let err = fsm.pump(&mut trace, 7).unwrap_err();
        assert_eq!(err, DecisionError::InvalidChoice { index: 7, len: 2 });
        assert_eq!(fsm.current(), Some("MIDDLE"));
        assert_eq!(trace.arrivals, vec!["MIDDLE"]);
    }

    #[test]
    fn test_pump_after_terminal_is_invalid_operation() {
        let mut fsm = machine();
        let mut trace = Trace::default();
        fsm.pump(&mut trace, 0).unwrap();
        fsm.pump(&mut trace, 1).unwrap();

        assert!(fsm.is_finished());
        assert_eq!(trace.arrivals, vec!["MIDDLE", "FINISHED"]);
        assert!(matches!(
            fsm.pump(&mut trace, 0),
            Err(DecisionError::InvalidOperation(_))
        ));
        assert!(matches!(
            fsm.pump(&mut trace, 1),
            Err(DecisionError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_duplicate_state() {
        let mut fsm = machine();
        assert_eq!(
            fsm.add_state("START", None, None, true),
            Err(DecisionError::DuplicateState("START"))
        );
    }

    #[test]
    fn test_unknown_start() {
        let mut fsm: StateMachine<Trace> = StateMachine::new();
        assert_eq!(fsm.set_start("A"), Err(DecisionError::UnknownState("A")));
    }

    #[test]
    fn test_pump_without_start() {
        let mut fsm: StateMachine<Trace> = StateMachine::new();
        fsm.add_state("A", None, Some(start), false).unwrap();
        assert!(matches!(
            fsm.pump(&mut Trace::default(), 0),
            Err(DecisionError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_transition_to_unregistered_state() {
        let mut fsm: StateMachine<Trace> = StateMachine::new();
        fsm.add_state("A", None, Some(to_nowhere), false).unwrap();
        fsm.set_start("A").unwrap();

        let mut trace = Trace::default();
        assert_eq!(
            fsm.pump(&mut trace, 0),
            Err(DecisionError::UnknownState("NOWHERE"))
        );
        assert_eq!(fsm.current(), None);
    }

    #[test]
    fn test_state_without_transition_is_invalid_operation() {
        let mut fsm: StateMachine<Trace> = StateMachine::new();
        fsm.add_state("A", None, None, false).unwrap();
        fsm.set_start("A").unwrap();

        assert_eq!(
            fsm.pump(&mut Trace::default(), 0),
            Err(DecisionError::InvalidOperation("state has no transition"))
        );
    }
}
