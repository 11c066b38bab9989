//! Command implementations.

use std::sync::Arc;

use kc_nin_autolink::{
    mask_identity_number, AuthenticatorFactory, AutoLinkConfig, Decision, DecisionState,
    LinkDecisionEngine, NinAutoLinkAuthenticatorFactory, Outcome,
};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::{EvaluateArgs, MaskArgs};
use crate::config::OutputFormat;
use crate::error::CliResult;
use crate::fixtures::{read_directory, read_session};
use crate::output;

/// Runs `evaluate`.
pub async fn run_evaluate(
    args: EvaluateArgs,
    config: AutoLinkConfig,
    format: OutputFormat,
) -> CliResult<()> {
    let decision = evaluate(&args, config).await?;
    let report = DecisionReport::from(&decision);

    match format {
        OutputFormat::Json => output::json(&report)?,
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}

async fn evaluate(args: &EvaluateArgs, config: AutoLinkConfig) -> CliResult<Decision> {
    let session = read_session(&args.session)?;
    let directory = Arc::new(read_directory(&args.directory)?.into_directory(session.realm_id));
    tracing::debug!(accounts = directory.len(), realm_id = %session.realm_id, "Loaded directory fixture");

    let engine = LinkDecisionEngine::new(directory.clone(), directory).with_config(config);
    Ok(engine.decide(&session).await)
}

/// Printable form of a decision. The account username is masked.
#[derive(Debug, Serialize)]
struct DecisionReport {
    state: DecisionState,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<AccountReport>,
}

#[derive(Debug, Serialize)]
struct AccountReport {
    id: Uuid,
    realm_id: Uuid,
    username: String,
}

impl From<&Decision> for DecisionReport {
    fn from(decision: &Decision) -> Self {
        let (outcome, account) = match &decision.outcome {
            Outcome::LinkAndSucceed(account) => (
                "link_and_succeed",
                Some(AccountReport {
                    id: account.id,
                    realm_id: account.realm_id,
                    username: mask_identity_number(&account.username),
                }),
            ),
            Outcome::DeferToNormalFlow => ("defer_to_normal_flow", None),
            Outcome::Abstain => ("abstain", None),
        };
        Self {
            state: decision.state,
            outcome,
            account,
        }
    }
}

fn print_report(report: &DecisionReport) {
    match (report.state, &report.account) {
        (_, Some(account)) => {
            output::success("Brokered identity would be auto-linked");
            output::field("Account", account.id);
            output::field("Username", &account.username);
        }
        (DecisionState::InternalError, None) => {
            output::error("Evaluation failed; the flow would continue normally");
        }
        (_, None) => output::info("Deferred to the normal first broker login flow"),
    }
    output::field("State", state_label(report.state));
}

const fn state_label(state: DecisionState) -> &'static str {
    match state {
        DecisionState::NotBroker => "not a broker login",
        DecisionState::NoIdentityNumber => "no identity number",
        DecisionState::NoMatchingAccount => "no matching account",
        DecisionState::AccountHasCredentials => "account has credentials",
        DecisionState::Linked => "linked",
        DecisionState::InternalError => "internal error",
    }
}

/// Runs `describe`.
pub fn run_describe(config: AutoLinkConfig, format: OutputFormat) -> CliResult<()> {
    #[derive(Serialize)]
    struct Description<'a> {
        #[serde(flatten)]
        metadata: kc_nin_autolink::AuthenticatorMetadata,
        settings: &'a AutoLinkConfig,
    }

    let metadata = metadata_only();
    match format {
        OutputFormat::Json => output::json(&Description {
            metadata,
            settings: &config,
        })?,
        OutputFormat::Text => {
            output::info(metadata.display_type);
            output::field("Provider ID", metadata.id);
            output::field("Category", metadata.reference_category);
            output::field("Configurable", metadata.configurable);
            output::field("User setup allowed", metadata.user_setup_allowed);
            output::field(
                "Requirements",
                format!("{:?}", metadata.requirement_choices),
            );
            output::field("Broker marker note", &config.broker_marker_note);
            output::field("Identity claim", &config.identity_claim);
            output::field("Identity attribute", &config.identity_attribute);
            output::field("Blocking credential", config.credential_kind);
            println!();
            println!("{}", metadata.help_text);
        }
    }
    Ok(())
}

fn metadata_only() -> kc_nin_autolink::AuthenticatorMetadata {
    let directory = Arc::new(kc_nin_autolink::InMemoryDirectory::new());
    NinAutoLinkAuthenticatorFactory::new(LinkDecisionEngine::new(directory.clone(), directory))
        .metadata()
}

/// Runs `mask`.
pub fn run_mask(args: &MaskArgs, format: OutputFormat) -> CliResult<()> {
    let masked = mask_identity_number(args.value.trim());
    match format {
        OutputFormat::Json => output::json(&serde_json::json!({ "masked": masked }))?,
        OutputFormat::Text => println!("{masked}"),
    }
    Ok(())
}
