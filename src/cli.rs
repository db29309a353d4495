use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::time::Duration;

use crate::models::admin::RoleFilter;
use crate::models::earnings::TimeRange;
use crate::models::matches::{Match, MatchList};
use crate::models::payment_methods::{PaymentMethod, UpdateWindow};
use crate::models::referrals::{ReferralCheck, ReferralSettings};
use crate::models::transactions::{PaymentType, Transaction, TransactionFilter, TransactionStatus};
use crate::models::users::User;
use crate::repositories::session::SessionStore;
use crate::services::admin::{filter_users, AdminService, PendingKind};
use crate::services::auth::{AuthService, Registration};
use crate::services::earnings::{EarningsClient, EarningsRequestHandler};
use crate::services::matches::MatchFeed;
use crate::services::payment_methods::{format_day, PaymentMethodService};
use crate::services::referral::{ReferralService, INVALID_CODE};
use crate::services::session::{AppSession, SessionState, View};
use crate::services::wallet::WalletService;
use crate::services::{Backend, ServiceError};
use crate::settings::Settings;

const LOCK_NOTICE: &str = "Your account has been restricted. Please contact support.";

#[derive(Parser)]
#[command(name = "crickbuzz", version, about = "CrickBuzz wallet, matches and rewards")]
pub struct Cli {
    #[arg(short, long, global = true, default_value = "crickbuzz.toml")]
    pub config: String,
    #[arg(long, global = true, default_value = "log4rs.yaml")]
    pub log4rs: String,
    /// Overrides `api.base_url`.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Login {
        phone: String,
        #[arg(short, long)]
        password: String,
    },
    Register {
        phone: String,
        name: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        referral_code: Option<String>,
        #[arg(long)]
        accept_terms: bool,
    },
    Logout,
    Whoami,
    Balance,
    /// Creates a recharge and prints the UPI payment details. Without an
    /// amount, lists the latest recharges.
    Recharge { amount: Option<String> },
    /// Attaches a UTR to a processing recharge.
    Utr { transaction_id: String, utr: String },
    Withdraw { amount: String },
    Orders {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long = "type")]
        payment_type: Option<String>,
    },
    Matches {
        /// Keep refreshing until interrupted.
        #[arg(long)]
        watch: bool,
        /// Query a single feed instead of the combined one.
        #[arg(long, value_enum, conflicts_with = "watch")]
        only: Option<FeedArg>,
    },
    Match { id: String },
    Earn,
    EarnStats {
        /// Follow the cooldown countdown until it ends.
        #[arg(long)]
        watch: bool,
    },
    Earnings {
        #[arg(long, value_enum, default_value_t = RangeArg::All)]
        range: RangeArg,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    PaymentMethod {
        #[command(subcommand)]
        action: PaymentMethodCommand,
    },
    Refer {
        #[command(subcommand)]
        action: ReferCommand,
    },
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Subcommand)]
pub enum PaymentMethodCommand {
    Show,
    Set(PaymentMethodArgs),
}

#[derive(Args)]
pub struct PaymentMethodArgs {
    #[arg(long)]
    pub holder: String,
    #[arg(long)]
    pub account: String,
    #[arg(long)]
    pub ifsc: String,
    #[arg(long, default_value = "")]
    pub bank: String,
    #[arg(long, default_value = "")]
    pub upi: String,
}

#[derive(Subcommand)]
pub enum ReferCommand {
    Link,
    Verify { code: String },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    Dashboard,
    Users {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, value_enum, default_value_t = RoleArg::User)]
        role: RoleArg,
    },
    Payments,
    Withdrawals,
    Approve { transaction_id: String },
    Cancel { transaction_id: String },
    Restrict { user_id: String },
    Unrestrict { user_id: String },
    Delete { user_id: String },
    Edit {
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Shows a user's saved payout details.
    Bank { user_id: String },
    ReferralSettings {
        #[arg(long)]
        referrer_reward: Option<f64>,
        #[arg(long)]
        referred_reward: Option<f64>,
        #[arg(long)]
        active: Option<bool>,
    },
    Loss,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RangeArg {
    All,
    Today,
    Week,
    Month,
}

impl From<RangeArg> for TimeRange {
    fn from(value: RangeArg) -> Self {
        match value {
            RangeArg::All => TimeRange::All,
            RangeArg::Today => TimeRange::Today,
            RangeArg::Week => TimeRange::Week,
            RangeArg::Month => TimeRange::Month,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FeedArg {
    Live,
    Upcoming,
    Series,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    User,
    Admin,
    All,
}

impl From<RoleArg> for RoleFilter {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::User => RoleFilter::User,
            RoleArg::Admin => RoleFilter::Admin,
            RoleArg::All => RoleFilter::All,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StatusArg {
    Processing,
    Pending,
    Completed,
    Cancelled,
    Failed,
}

impl From<StatusArg> for TransactionStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Processing => TransactionStatus::Processing,
            StatusArg::Pending => TransactionStatus::Pending,
            StatusArg::Completed => TransactionStatus::Completed,
            StatusArg::Cancelled => TransactionStatus::Cancelled,
            StatusArg::Failed => TransactionStatus::Failed,
        }
    }
}

struct Context {
    settings: Settings,
    backend: Backend,
    session: AppSession,
}

pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    let store = SessionStore::from_config(settings.session.path.as_deref())?;
    let mut session = AppSession::new(store);
    let state = session.restore()?;

    if state == SessionState::Restricted && !matches!(cli.command, Command::Logout) {
        println!("{}", LOCK_NOTICE);
        return Ok(());
    }

    let backend = Backend::from_settings(&settings)?;
    let mut ctx = Context {
        settings,
        backend,
        session,
    };

    match dispatch(&mut ctx, cli.command).await {
        Err(ServiceError::Restricted) => {
            println!("{}", LOCK_NOTICE);
            Ok(())
        }
        other => other.map_err(anyhow::Error::from),
    }
}

async fn dispatch(ctx: &mut Context, command: Command) -> Result<(), ServiceError> {
    if ctx.session.view() == View::Restricted && !matches!(command, Command::Logout) {
        return Err(ServiceError::Restricted);
    }

    match command {
        Command::Login { phone, password } => {
            let auth = AuthService::new(ctx.backend.auth.clone());
            let user = auth.login(&phone, &password).await?;
            let greeting = welcome(&ctx.settings, &user, true);
            let tab = ctx.session.login(user)?;
            println!("[*] {} Landing on {}.", greeting, tab);
        }
        Command::Register {
            phone,
            name,
            password,
            referral_code,
            accept_terms,
        } => {
            let auth = AuthService::new(ctx.backend.auth.clone());
            let user = auth
                .register(Registration {
                    phone: &phone,
                    name: &name,
                    password: &password,
                    referral_code: referral_code.as_deref(),
                    accepted_terms: accept_terms,
                })
                .await?;
            let greeting = welcome(&ctx.settings, &user, false);
            let tab = ctx.session.login(user)?;
            println!("[*] {} Landing on {}.", greeting, tab);
        }
        Command::Logout => {
            ctx.session.logout()?;
            println!("[*] Logged out.");
        }
        Command::Whoami => {
            let user = ctx.session.require_user()?;
            println!("{} ({})", user.name, user.phone);
            println!("Role: {}", if user.is_admin { "admin" } else { "user" });
            if let Some(code) = &user.referral_code {
                println!("Referral code: {}", code);
            }
        }
        Command::Balance => {
            ctx.session.require_user()?;
            let balance = ctx.session.refresh_balance(&ctx.backend.wallet).await?;
            println!("Balance: {}", money(&ctx.settings, balance));
        }
        Command::Recharge { amount: None } => {
            let user = ctx.session.require_user()?.clone();
            let recent = wallet(ctx).recent_recharges(&user).await?;
            if recent.is_empty() {
                println!("No recharges yet.");
            }
            for transaction in &recent {
                print_transaction(&ctx.settings, transaction);
            }
        }
        Command::Recharge {
            amount: Some(amount),
        } => {
            let user = ctx.session.require_user()?.clone();
            let payment = wallet(ctx).recharge(&user, &amount).await?;

            println!("[*] Recharge {} created.", payment.transaction.id);
            println!("Pay {} to {}", money(&ctx.settings, payment.amount as f64), payment.upi_id);
            println!("QR: {}", payment.qr_payload);
            println!("Open: {}", payment.deep_link);
            println!(
                "Then run `crickbuzz utr {} <UTR>` so the payment can be verified.",
                payment.transaction.id
            );
            ctx.session.begin_payment(payment);
        }
        Command::Utr {
            transaction_id,
            utr,
        } => {
            ctx.session.require_user()?;
            wallet(ctx).submit_utr(&transaction_id, &utr).await?;
            println!("[*] UTR submitted. Your recharge will be verified shortly.");
        }
        Command::Withdraw { amount } => {
            let user = ctx.session.require_user()?.clone();
            let balance = ctx.session.refresh_balance(&ctx.backend.wallet).await?;
            let transaction = wallet(ctx).withdraw(&user, &amount, balance).await?;
            println!(
                "[*] Withdrawal of {} requested ({}).",
                money(&ctx.settings, transaction.amount),
                transaction.id
            );
        }
        Command::Orders {
            status,
            payment_type,
        } => {
            let user = ctx.session.require_user()?.clone();
            let filter = TransactionFilter {
                status: status.map(TransactionStatus::from),
                payment_type: payment_type.map(PaymentType::from),
            };
            let transactions = wallet(ctx).transactions(&user, &filter).await?;
            if transactions.is_empty() {
                println!("No transactions yet.");
            }
            for transaction in &transactions {
                print_transaction(&ctx.settings, transaction);
            }
        }
        Command::Matches { watch, only } => {
            ctx.session.require_user()?;
            let feed = MatchFeed::new(ctx.backend.cricket.clone());
            match only {
                Some(FeedArg::Live) => feed.current().await?.iter().for_each(print_match),
                Some(FeedArg::Upcoming) => feed.upcoming().await?.iter().for_each(print_match),
                Some(FeedArg::Series) => {
                    for series in feed.series().await? {
                        let name = series.get("name").and_then(|n| n.as_str());
                        println!("  {}", name.unwrap_or("Unnamed series"));
                    }
                }
                None if watch => watch_matches(ctx, &feed).await?,
                None => {
                    let snapshot = feed.refresh().await?;
                    if let Some(notice) = &snapshot.notice {
                        println!("[!] {}", notice);
                    }
                    print_match_list(&snapshot.matches);
                }
            }
        }
        Command::Match { id } => {
            ctx.session.require_user()?;
            let feed = MatchFeed::new(ctx.backend.cricket.clone());
            let details = feed.details(&id).await?;
            print_match(&Match(details.clone()));
            println!("{}", serde_json::to_string_pretty(&details).unwrap_or_default());
        }
        Command::Earn => {
            let user = ctx.session.require_user()?.clone();
            let handler = EarningsRequestHandler::new(ctx.backend.earnings.clone());
            handler.stats(&user.phone).await?;
            let earnings = EarningsClient::spawn(handler);

            match earnings.click(user.phone.clone()).await {
                Ok(outcome) => {
                    println!("[*] You earned {}!", money(&ctx.settings, outcome.amount));
                    if let Some(message) = &outcome.message {
                        println!("{}", message);
                    }
                    if let Some(warning) = &outcome.cooldown_warning {
                        println!("[!] {}", warning);
                    }
                    let tracker = earnings.cooldown().await?;
                    if tracker.show_streak_warning() {
                        println!(
                            "[!] {} clicks in a row. Slow down or a cooldown will kick in.",
                            tracker.consecutive_clicks()
                        );
                    }
                }
                Err(e) if e.is_server_cooldown() => {
                    let tracker = earnings.cooldown().await?;
                    println!(
                        "[!] Cooling down. Try again in {} ({} min).",
                        tracker.display(),
                        tracker.minutes()
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Command::EarnStats { watch } => {
            let user = ctx.session.require_user()?.clone();
            let handler = EarningsRequestHandler::new(ctx.backend.earnings.clone());
            let stats = handler.stats(&user.phone).await?;

            println!(
                "Clicks today: {}/{} ({} left)",
                stats.clicks_today, stats.max_clicks, stats.clicks_remaining
            );
            if let Some(tier) = &stats.tier {
                println!("Tier: {}", tier);
            }
            println!("Max per click: {}", money(&ctx.settings, stats.max_earning));

            let tracker = handler.cooldown();
            if tracker.is_active() {
                println!("Cooldown: {}", tracker.display());
                if watch {
                    follow_cooldown(ctx, &handler, &user).await;
                }
            } else if tracker.show_streak_warning() {
                println!("[!] {} clicks in a row.", tracker.consecutive_clicks());
            }
        }
        Command::Earnings { range, limit } => {
            let user = ctx.session.require_user()?.clone();
            let earnings = EarningsClient::spawn(EarningsRequestHandler::new(
                ctx.backend.earnings.clone(),
            ));
            let range = TimeRange::from(range);
            let summary = earnings.summary(user.phone.clone(), range).await?;
            let history = earnings.history(user.phone.clone(), range, limit).await?;

            println!("Total: {}", money(&ctx.settings, summary.total));
            println!("Today: {}", money(&ctx.settings, summary.today));
            println!("This week: {}", money(&ctx.settings, summary.this_week));
            println!("This month: {}", money(&ctx.settings, summary.this_month));
            for transaction in &history {
                print_transaction(&ctx.settings, transaction);
            }
        }
        Command::PaymentMethod { action } => {
            let user = ctx.session.require_user()?.clone();
            let service = PaymentMethodService::new(ctx.backend.payment_methods.clone());
            match action {
                PaymentMethodCommand::Show => match service.load(&user).await? {
                    Some(saved) => {
                        print_payment_method(&saved.payment_method);
                        match saved.window {
                            UpdateWindow::Open => println!("You can update these details now."),
                            UpdateWindow::Closed { next_update } => println!(
                                "You will be able to update it on {}",
                                format_day(next_update)
                            ),
                        }
                    }
                    None => println!("No payment method saved yet."),
                },
                PaymentMethodCommand::Set(args) => {
                    let payment_method = PaymentMethod {
                        account_holder_name: args.holder,
                        account_number: args.account,
                        ifsc_code: args.ifsc,
                        bank_name: args.bank,
                        upi_id: args.upi,
                        last_updated_at: None,
                    };
                    service.save(&user, &payment_method).await?;
                    println!("[*] Payment method saved.");
                }
            }
        }
        Command::Refer { action } => {
            let service = ReferralService::new(ctx.backend.referral.clone());
            match action {
                ReferCommand::Link => {
                    let user = ctx.session.require_user()?.clone();
                    match service.link(&user).await? {
                        Some(link) => {
                            println!("Code: {}", link.referral_code);
                            if let Some(url) = &link.referral_link {
                                println!("Link: {}", url);
                            }
                            if let Some(total) = link.total_referrals {
                                println!("Referrals: {}", total);
                            }
                            if let Some(earned) = link.total_earnings {
                                println!("Earned: {}", money(&ctx.settings, earned));
                            }
                        }
                        None => println!("The referral programme is currently paused."),
                    }
                }
                ReferCommand::Verify { code } => match service.verify(&code).await? {
                    ReferralCheck::NotReady => println!("Referral codes are 6 characters long."),
                    ReferralCheck::Valid {
                        referrer_name: Some(name),
                    } => println!("[*] Valid referral code from {}.", name),
                    ReferralCheck::Valid { referrer_name: None } => {
                        println!("[*] Valid referral code.")
                    }
                    ReferralCheck::Invalid => println!("[!] {}", INVALID_CODE),
                },
            }
        }
        Command::Admin { action } => admin(ctx, action).await?,
    }

    Ok(())
}

async fn admin(ctx: &mut Context, action: AdminCommand) -> Result<(), ServiceError> {
    let admin = ctx.session.require_admin()?.clone();
    let service = AdminService::new(
        ctx.backend.admin.clone(),
        ctx.backend.payment_methods.clone(),
    );

    match action {
        AdminCommand::Dashboard => {
            let stats = service.dashboard(&admin).await?;
            println!("Users: {}", stats.total_users);
            println!("Transactions: {}", stats.total_transactions);
            println!("Pending: {}", stats.pending_transactions);
            println!("Wallet balances: {}", money(&ctx.settings, stats.total_balance));
        }
        AdminCommand::Users { query, role } => {
            let users = service.users(&admin).await?;
            let found = filter_users(&users, &query, role.into());
            if found.is_empty() {
                println!("No users match.");
            }
            for user in found {
                print_user(&ctx.settings, user);
            }
        }
        AdminCommand::Payments => print_pending(ctx, &service, &admin, PendingKind::Payments).await?,
        AdminCommand::Withdrawals => {
            print_pending(ctx, &service, &admin, PendingKind::Withdrawals).await?
        }
        AdminCommand::Approve { transaction_id } => {
            service.approve(&admin, &transaction_id).await?;
            println!("[*] {} approved.", transaction_id);
        }
        AdminCommand::Cancel { transaction_id } => {
            service.cancel(&admin, &transaction_id).await?;
            println!("[*] {} cancelled.", transaction_id);
        }
        AdminCommand::Restrict { user_id } => {
            service.set_restricted(&admin, &user_id, true).await?;
            println!("[*] {} restricted.", user_id);
        }
        AdminCommand::Unrestrict { user_id } => {
            service.set_restricted(&admin, &user_id, false).await?;
            println!("[*] {} unrestricted.", user_id);
        }
        AdminCommand::Delete { user_id } => {
            service.delete_user(&admin, &user_id).await?;
            println!("[*] {} deleted.", user_id);
        }
        AdminCommand::Edit {
            user_id,
            name,
            password,
        } => {
            service
                .update_user(&admin, &user_id, &name, password.as_deref())
                .await?;
            println!("[*] {} updated.", user_id);
        }
        AdminCommand::Bank { user_id } => match service.user_payment_method(&admin, &user_id).await? {
            Some(payment_method) => print_payment_method(&payment_method),
            None => println!("{} has no payment method saved.", user_id),
        },
        AdminCommand::ReferralSettings {
            referrer_reward,
            referred_reward,
            active,
        } => {
            let referrals = ReferralService::new(ctx.backend.referral.clone());
            let mut settings = referrals.settings(&admin).await?;

            if referrer_reward.is_some() || referred_reward.is_some() || active.is_some() {
                settings = ReferralSettings {
                    referrer_reward: referrer_reward.unwrap_or(settings.referrer_reward),
                    referred_reward: referred_reward.unwrap_or(settings.referred_reward),
                    is_active: active.unwrap_or(settings.is_active),
                };
                settings = referrals.update_settings(&admin, &settings).await?;
                println!("[*] Referral settings saved.");
            }

            println!("Referrer reward: {}", money(&ctx.settings, settings.referrer_reward));
            println!("Referred reward: {}", money(&ctx.settings, settings.referred_reward));
            println!("Active: {}", settings.is_active);
        }
        AdminCommand::Loss => {
            let loss = service.loss_tracking(&admin).await?;
            println!("Total loss: {}", money(&ctx.settings, loss.total_loss));
            println!("Recharged: {}", money(&ctx.settings, loss.total_recharged));
            println!("Withdrawn: {}", money(&ctx.settings, loss.total_withdrawn));
            println!("Earned: {}", money(&ctx.settings, loss.total_earned));
            for user in &loss.users {
                println!("{}", user);
            }
        }
    }

    Ok(())
}

async fn print_pending(
    ctx: &Context,
    service: &AdminService,
    admin: &User,
    kind: PendingKind,
) -> Result<(), ServiceError> {
    let pending = service.pending(admin, kind).await?;
    if pending.is_empty() {
        println!("Nothing waiting for review.");
    }
    for transaction in &pending {
        print_transaction(&ctx.settings, transaction);
    }
    Ok(())
}

fn wallet(ctx: &Context) -> WalletService {
    WalletService::new(ctx.backend.wallet.clone(), ctx.settings.app.clone())
}

async fn watch_matches(ctx: &Context, feed: &MatchFeed) -> Result<(), ServiceError> {
    let polling = &ctx.settings.polling;
    let mut updates = feed.subscribe();
    let task = feed.start_refresh_task(
        Duration::from_secs(polling.match_refresh_secs),
        polling.jitter_ms,
    );

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if let Some(notice) = &snapshot.notice {
                    println!("[!] {}", notice);
                }
                print_match_list(&snapshot.matches);
                println!("---");
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    task.abort();
    Ok(())
}

async fn follow_cooldown(ctx: &Context, handler: &EarningsRequestHandler, user: &User) {
    let sync = handler.start_cooldown_sync(
        user.phone.clone(),
        Duration::from_secs(ctx.settings.polling.cooldown_sync_secs),
    );
    let mut interval = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let tracker = handler.cooldown();
                if !tracker.is_active() {
                    println!("[*] Cooldown over, you can earn again.");
                    break;
                }
                println!("Cooldown: {}", tracker.display());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    sync.abort();
}

fn welcome(settings: &Settings, user: &User, returning: bool) -> String {
    let again = if returning { " back" } else { "" };
    format!("Welcome{} to {}, {}.", again, settings.app.name, user.name)
}

fn money(settings: &Settings, amount: f64) -> String {
    format!("{}{:.2}", settings.app.currency, amount)
}

fn print_transaction(settings: &Settings, transaction: &Transaction) {
    let sign = if transaction.payment_type.is_credit() { "+" } else { "-" };
    println!(
        "{}  {:<12} {}{:<10} {:<10} {}{}",
        transaction.id,
        transaction.payment_type.label(),
        sign,
        money(settings, transaction.amount),
        transaction.status,
        transaction.created_at.as_deref().unwrap_or(""),
        if transaction.accepts_utr() && transaction.utr.is_none() {
            "  (UTR pending)"
        } else {
            ""
        }
    );
}

fn print_user(settings: &Settings, user: &User) {
    println!(
        "{}  {:<20} {:<12} {}{}{}",
        user.key(),
        user.name,
        user.phone,
        money(settings, user.wallet_balance),
        if user.is_admin { "  admin" } else { "" },
        if user.is_restricted { "  restricted" } else { "" }
    );
}

fn print_payment_method(payment_method: &PaymentMethod) {
    println!("Account holder: {}", payment_method.account_holder_name);
    println!("Account number: {}", payment_method.account_number);
    println!("IFSC: {}", payment_method.ifsc_code);
    if !payment_method.bank_name.is_empty() {
        println!("Bank: {}", payment_method.bank_name);
    }
    if !payment_method.upi_id.is_empty() {
        println!("UPI: {}", payment_method.upi_id);
    }
}

fn print_match_list(matches: &MatchList) {
    if matches.is_empty() {
        println!("No matches right now.");
        return;
    }
    if !matches.live.is_empty() {
        println!("Live");
        matches.live.iter().for_each(print_match);
    }
    if !matches.upcoming.is_empty() {
        println!("Upcoming");
        matches.upcoming.iter().for_each(print_match);
    }
}

fn print_match(m: &Match) {
    let teams = m.teams();
    let title = match (m.name(), teams.as_slice()) {
        (Some(name), _) => name.to_string(),
        (None, [home, away, ..]) => format!("{} vs {}", home, away),
        _ => "Unnamed match".to_string(),
    };

    println!(
        "  [{}] {}{}",
        m.id().unwrap_or_default(),
        title,
        m.match_type().map(|t| format!(" ({})", t)).unwrap_or_default()
    );
    if let Some(venue) = m.venue() {
        println!("    {}", venue);
    }
    for score in m.scores() {
        println!("    {}", score);
    }
    if let Some(status) = m.status() {
        println!("    {}", status);
    }
}
