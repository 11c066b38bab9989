//! Decision outcomes and the sink that reports them to the host.

use serde::Serialize;

use crate::account::LocalAccount;

/// Terminal state reached by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionState {
    /// The login is not brokered.
    NotBroker,
    /// No identity number in the brokered identity.
    NoIdentityNumber,
    /// No local account has the identity number as username.
    NoMatchingAccount,
    /// The matching account already has a credential configured.
    AccountHasCredentials,
    /// The account was linked.
    Linked,
    /// Evaluation failed unexpectedly.
    InternalError,
}

/// What the host flow engine should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "account", rename_all = "snake_case")]
pub enum Outcome {
    /// Bind the account as the authenticated user and succeed.
    LinkAndSucceed(LocalAccount),
    /// Continue with the next configured step of the flow.
    DeferToNormalFlow,
    /// Evaluation failed; continue as if this step did nothing.
    Abstain,
}

impl Outcome {
    /// Reports this outcome to the sink. Exactly one sink operation is invoked.
    pub fn dispatch(self, sink: &mut dyn OutcomeSink) {
        match self {
            Self::LinkAndSucceed(account) => sink.bind_user_and_succeed(account),
            Self::DeferToNormalFlow => sink.defer_to_normal_flow(),
            Self::Abstain => sink.abstain_with_error(),
        }
    }

    /// Checks if this outcome links an account.
    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(self, Self::LinkAndSucceed(_))
    }
}

/// Result of one evaluation: the terminal state and the outcome it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Terminal state.
    pub state: DecisionState,
    /// Outcome for the host.
    pub outcome: Outcome,
}

impl Decision {
    /// Creates a deferring decision for a not-applicable state.
    #[must_use]
    pub(crate) const fn defer(state: DecisionState) -> Self {
        Self {
            state,
            outcome: Outcome::DeferToNormalFlow,
        }
    }

    /// Creates a linking decision.
    #[must_use]
    pub(crate) const fn linked(account: LocalAccount) -> Self {
        Self {
            state: DecisionState::Linked,
            outcome: Outcome::LinkAndSucceed(account),
        }
    }

    /// Creates an abstaining decision.
    #[must_use]
    pub(crate) const fn internal_error() -> Self {
        Self {
            state: DecisionState::InternalError,
            outcome: Outcome::Abstain,
        }
    }
}

/// Signalling operations exposed by the host flow engine.
pub trait OutcomeSink: Send {
    /// Sets the account as the authenticated user and marks the step successful.
    fn bind_user_and_succeed(&mut self, account: LocalAccount);

    /// Marks the step as attempted so the flow continues normally.
    fn defer_to_normal_flow(&mut self);

    /// Marks the step as failed internally; the flow continues normally.
    fn abstain_with_error(&mut self);
}

/// A signal received by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowSignal {
    /// `bind_user_and_succeed` was called.
    Bound(LocalAccount),
    /// `defer_to_normal_flow` was called.
    Deferred,
    /// `abstain_with_error` was called.
    Abstained,
}

/// Sink that records every signal, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    signals: Vec<FlowSignal>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded signals.
    #[must_use]
    pub fn signals(&self) -> &[FlowSignal] {
        &self.signals
    }

    /// Returns the accounts bound so far.
    #[must_use]
    pub fn bound_accounts(&self) -> Vec<&LocalAccount> {
        self.signals
            .iter()
            .filter_map(|signal| match signal {
                FlowSignal::Bound(account) => Some(account),
                _ => None,
            })
            .collect()
    }
}

impl OutcomeSink for RecordingSink {
    fn bind_user_and_succeed(&mut self, account: LocalAccount) {
        self.signals.push(FlowSignal::Bound(account));
    }

    fn defer_to_normal_flow(&mut self) {
        self.signals.push(FlowSignal::Deferred);
    }

    fn abstain_with_error(&mut self) {
        self.signals.push(FlowSignal::Abstained);
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn dispatch_invokes_one_operation() {
        let account = LocalAccount::new(Uuid::now_v7(), "12345678901");

        let mut sink = RecordingSink::new();
        Outcome::LinkAndSucceed(account.clone()).dispatch(&mut sink);
        assert_eq!(sink.signals(), &[FlowSignal::Bound(account.clone())]);
        assert_eq!(sink.bound_accounts(), vec![&account]);

        let mut sink = RecordingSink::new();
        Outcome::DeferToNormalFlow.dispatch(&mut sink);
        assert_eq!(sink.signals(), &[FlowSignal::Deferred]);

        let mut sink = RecordingSink::new();
        Outcome::Abstain.dispatch(&mut sink);
        assert_eq!(sink.signals(), &[FlowSignal::Abstained]);
        assert!(sink.bound_accounts().is_empty());
    }

    #[test]
    fn decision_constructors() {
        let decision = Decision::defer(DecisionState::NoMatchingAccount);
        assert_eq!(decision.outcome, Outcome::DeferToNormalFlow);
        assert!(!decision.outcome.is_link());

        let decision = Decision::internal_error();
        assert_eq!(decision.state, DecisionState::InternalError);
        assert_eq!(decision.outcome, Outcome::Abstain);

        let account = LocalAccount::new(Uuid::now_v7(), "12345678901");
        let decision = Decision::linked(account);
        assert_eq!(decision.state, DecisionState::Linked);
        assert!(decision.outcome.is_link());
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(Decision::defer(DecisionState::NotBroker)).unwrap();
        assert_eq!(json["state"], "NOT_BROKER");
        assert_eq!(json["outcome"]["outcome"], "defer_to_normal_flow");
    }
}
