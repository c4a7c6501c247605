use std::path::PathBuf;

use clap::{Parser, Subcommand};
use edubooster_client::models::SubscriptionStatus;

/// Administer the EduBooster platform from the terminal.
#[derive(Parser, Debug)]
#[command(name = "edubooster", version, about)]
pub struct Cli {
    /// API base endpoint (overrides EDUBOOSTER_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Admin email used to log in.
    #[arg(long, global = true, env = "EDUBOOSTER_EMAIL")]
    pub email: Option<String>,

    /// Admin password used to log in.
    #[arg(long, global = true, env = "EDUBOOSTER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log session activity to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the logged-in admin.
    Whoami,
    /// End the backend session.
    Logout,
    /// Overview counts and revenue.
    Dashboard,
    /// Platform users.
    #[command(subcommand)]
    Users(UsersCmd),
    /// Provinces.
    #[command(subcommand)]
    Provinces(ProvincesCmd),
    /// School sections.
    #[command(subcommand)]
    Sections(SectionsCmd),
    /// Courses and their question banks.
    #[command(subcommand)]
    Courses(CoursesCmd),
    /// Premium subscriptions.
    #[command(subcommand)]
    Subscriptions(SubscriptionsCmd),
    /// Your notifications.
    #[command(subcommand)]
    Notifications(NotificationsCmd),
    /// Print the version.
    Version,
}

impl Commands {
    /// Whether the command talks to the backend.
    pub fn needs_session(&self) -> bool {
        !matches!(self, Commands::Version)
    }
}

#[derive(Subcommand, Debug)]
pub enum UsersCmd {
    List,
    /// Soft-delete a user.
    Delete { id: String },
    Restore { id: String },
    /// Flip a user's active flag.
    ToggleActive { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProvincesCmd {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "RDC")]
        country: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SectionsCmd {
    List,
    Add {
        #[arg(long)]
        name: String,
        /// Province id; repeat for several.
        #[arg(long = "province", required = true)]
        provinces: Vec<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        province_id: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CoursesCmd {
    List {
        /// Only courses attached to this section.
        #[arg(long)]
        section: Option<String>,
    },
    /// Upload a PDF and generate its questions.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Section id; repeat for several.
        #[arg(long = "section", required = true)]
        sections: Vec<String>,
        #[arg(long)]
        pdf: PathBuf,
    },
    Publish { id: String },
    Unpublish { id: String },
    Delete { id: String },
    /// Regenerate a course's questions.
    Regenerate { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionsCmd {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// PENDING, ACTIVE, FAILED or PAID.
        #[arg(long)]
        status: Option<SubscriptionStatus>,
    },
    Stats,
    /// Manually activate a pending subscription.
    Activate { id: String },
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCmd {
    List {
        /// Only unread notifications.
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read.
    Read { id: String },
}
