use std::sync::Arc;

use vocalis_answer::AnswerGenerator;
use vocalis_ledger::{DynCreditStore, FlatCost};
use vocalis_payments::{CheckoutClient, Reconciler};
use vocalis_speech::SynthesisProxy;

use crate::notify::Notifier;

/// Process-lifetime services shared by every handler
pub struct AppState {
    pub store: DynCreditStore,
    pub checkout: CheckoutClient,
    pub reconciler: Reconciler,
    pub speech: SynthesisProxy,
    pub answer: AnswerGenerator,
    pub notifier: Option<Notifier>,
    pub cost: FlatCost,
    pub welcome_credits: i64,
    pub history_limit: usize,
}

pub type SharedState = Arc<AppState>;
