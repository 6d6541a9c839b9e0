// src/cli.rs

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// The Pixela Command Line Interface is a unified tool to manage your
/// Pixela services.
///
/// Credentials come from flags, `PA_*` environment variables or a
/// `.pa.yaml` file, in that order.
#[derive(Parser, Debug)]
#[command(name = "pa", version, disable_help_subcommand = true)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Pixela user name
    #[arg(short, long, env = "PA_USERNAME", global = true)]
    pub username: Option<String>,

    /// Pixela user token
    #[arg(short, long, env = "PA_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Number of retries when a request is rejected
    #[arg(long, env = "PA_RETRY", global = true)]
    pub retry: Option<u32>,

    /// Path to a YAML config file
    ///
    /// Defaults to the first of ./.pa.yaml, ./.pa.yml, ~/.pa.yaml, ~/.pa.yml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pixela endpoint
    #[arg(long, env = "PA_BASE_URL", hide = true, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// User
    #[command(subcommand)]
    User(UserCommand),

    /// Profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Graph
    #[command(subcommand)]
    Graph(GraphCommand),

    /// Pixel
    #[command(subcommand)]
    Pixel(PixelCommand),

    /// Channel
    #[command(subcommand)]
    Channel(ChannelCommand),

    /// Notification
    #[command(subcommand)]
    Notification(NotificationCommand),

    /// Webhook
    #[command(subcommand)]
    Webhook(WebhookCommand),

    /// Generate shell completion
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ---------------------------------------------------------------------------
// user
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a new Pixela user
    Create(UserCreateArgs),

    /// Updates user token
    Update(UserUpdateArgs),

    /// Delete a Pixela user
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct UserCreateArgs {
    /// Agree to the terms of service
    #[arg(
        short,
        long,
        env = "PA_AGREE_TERMS_OF_SERVICE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub agree_terms_of_service: bool,

    /// You are not a minor, or you are a minor with parental consent
    #[arg(
        short = 'm',
        long,
        env = "PA_NOT_MINOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub not_minor: bool,

    /// Registration code obtained when you register for Patreon support
    #[arg(short = 'c', long, env = "PA_THANKS_CODE")]
    pub thanks_code: Option<String>,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct UserUpdateArgs {
    /// A new authentication token
    #[arg(short, long, env = "PA_NEW_TOKEN", hide_env_values = true)]
    pub new_token: Option<String>,

    /// Registration code obtained when you register for Patreon support
    #[arg(short = 'c', long, env = "PA_THANKS_CODE")]
    pub thanks_code: Option<String>,
}

/// Confirmation for destructive commands. Never read from the environment.
#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct DeleteArgs {
    /// Really delete
    #[arg(long)]
    pub delete_me: bool,
}

// ---------------------------------------------------------------------------
// profile
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Updates user profile
    Update(ProfileUpdateArgs),

    /// Get user profile page URL
    Get,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdateArgs {
    /// The user's name for display
    #[arg(long)]
    pub display_name: Option<String>,

    /// The email address registered as an icon in Gravatar
    #[arg(long)]
    pub gravatar_icon_email: Option<String>,

    /// The title of the user
    #[arg(long)]
    pub title: Option<String>,

    /// The user's time zone
    #[arg(long)]
    pub timezone: Option<String>,

    /// One external link shown on the profile
    #[arg(long)]
    pub about_url: Option<String>,

    /// Contribute URLs (comma separated, repeatable)
    #[arg(long, value_delimiter = ',')]
    pub contribute_urls: Vec<String>,

    /// Pin one of your own graphs
    #[arg(long)]
    pub pinned_graph_id: Option<String>,
}

// ---------------------------------------------------------------------------
// graph
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum GraphCommand {
    /// Create graph
    Create(GraphCreateArgs),

    /// Get graph definitions
    GetAll,

    /// Get graph definition
    Get(GraphIdArgs),

    /// Get the graph as an SVG diagram
    Svg(GraphSvgArgs),

    /// Get graph detail URL
    Detail(GraphDetailArgs),

    /// Get various statistics
    Stats(GraphIdArgs),

    /// Update graph
    Update(GraphUpdateArgs),

    /// Delete a graph
    Delete(GraphDeleteArgs),

    /// Get the dates of registered pixels
    Pixels(GraphPixelsArgs),

    /// Start and end the measurement of time
    Stopwatch(GraphIdArgs),

    /// Add quantity to today's pixel
    Add(GraphQuantityArgs),

    /// Subtract quantity from today's pixel
    Subtract(GraphQuantityArgs),

    /// Get the latest pixel
    GetLatestPixel(GraphIdArgs),
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GraphIdArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub id: String,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GraphCreateArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub id: Option<String>,

    /// The name of the pixelation graph
    #[arg(long)]
    pub name: Option<String>,

    /// Unit of the quantity recorded in the graph
    #[arg(long)]
    pub unit: Option<String>,

    /// Type of quantity: int or float
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Display color of the pixels
    #[arg(long)]
    pub color: Option<String>,

    /// Timezone for handling this graph
    #[arg(long)]
    pub timezone: Option<String>,

    /// See https://docs.pixe.la/entry/post-graph
    #[arg(long)]
    pub self_sufficient: Option<String>,

    /// Hide the graph from the graph list page
    #[arg(long)]
    pub secret: bool,

    /// Add each pixel's optionalData to the SVG
    #[arg(long)]
    pub publish_optional_data: bool,

    /// Start the week on Monday
    #[arg(long)]
    pub start_on_monday: bool,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GraphSvgArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub id: String,

    /// Render the graph as of this date (yyyyMMdd)
    #[arg(long)]
    pub date: Option<String>,

    /// Display mode
    #[arg(long)]
    pub mode: Option<String>,

    /// Appearance mode
    #[arg(long)]
    pub appearance: Option<String>,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GraphDetailArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub id: String,

    /// HTML page mode
    #[arg(long)]
    pub mode: Option<String>,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GraphUpdateArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub id: String,

    /// The name of the pixelation graph
    #[arg(long)]
    pub name: Option<String>,

    /// Unit of the quantity recorded in the graph
    #[arg(long)]
    pub unit: Option<String>,

    /// Display color of the pixels
    #[arg(long)]
    pub color: Option<String>,

    /// Timezone for handling this graph
    #[arg(long)]
    pub timezone: Option<String>,

    /// URLs to purge when the graph changes (comma separated, repeatable)
    #[arg(long, value_delimiter = ',')]
    pub purge_cache_urls: Vec<String>,

    /// See https://docs.pixe.la/entry/put-graph
    #[arg(long)]
    pub self_sufficient: Option<String>,

    /// Hide the graph from the graph list page
    #[arg(long, conflicts_with = "publish")]
    pub secret: bool,

    /// Show the graph on the graph list page
    #[arg(long)]
    pub publish: bool,

    /// Add each pixel's optionalData to the SVG
    #[arg(long, conflicts_with = "hide_optional_data")]
    pub publish_optional_data: bool,

    /// Leave each pixel's optionalData out of the SVG
    #[arg(long)]
    pub hide_optional_data: bool,

    /// Start the week on Monday
    #[arg(long)]
    pub start_on_monday: bool,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GraphDeleteArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub id: String,

    #[command(flatten)]
    pub confirm: DeleteArgs,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GraphPixelsArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub id: String,

    /// Start of the period (yyyyMMdd)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the period (yyyyMMdd)
    #[arg(long)]
    pub to: Option<String>,

    /// Return every field of each pixel
    #[arg(long)]
    pub with_body: bool,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct GraphQuantityArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub id: String,

    /// Quantity to apply to today's pixel
    #[arg(long)]
    pub quantity: String,
}

// ---------------------------------------------------------------------------
// pixel
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum PixelCommand {
    /// Create pixel
    Create(PixelCreateArgs),

    /// Increment today's pixel
    Increment(PixelGraphArgs),

    /// Decrement today's pixel
    Decrement(PixelGraphArgs),

    /// Get the quantity registered on a date
    Get(PixelDateArgs),

    /// Update pixel
    Update(PixelUpdateArgs),

    /// Delete pixel
    Delete(PixelDateArgs),
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct PixelGraphArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct PixelDateArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,

    /// Date of the pixel (yyyyMMdd)
    #[arg(long)]
    pub date: String,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct PixelCreateArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,

    /// Date on which the quantity is recorded (yyyyMMdd)
    #[arg(long)]
    pub date: Option<String>,

    /// Quantity registered on the date
    #[arg(long)]
    pub quantity: Option<String>,

    /// Additional information other than quantity
    #[arg(long)]
    pub optional_data: Option<String>,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct PixelUpdateArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,

    /// Date of the pixel (yyyyMMdd)
    #[arg(long)]
    pub date: String,

    /// Quantity registered on the date
    #[arg(long)]
    pub quantity: Option<String>,

    /// Additional information other than quantity
    #[arg(long)]
    pub optional_data: Option<String>,
}

// ---------------------------------------------------------------------------
// channel
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum ChannelCommand {
    /// Create channel
    Create(ChannelCreateArgs),

    /// Get channels
    Get,

    /// Update channel
    Update(ChannelUpdateArgs),

    /// Delete channel
    Delete(ChannelIdArgs),
}

/// Fields shared by channel create and update.
#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ChannelFields {
    /// The name of the channel
    #[arg(long)]
    pub name: Option<String>,

    /// The type of the channel
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Slack `userName` (https://docs.pixe.la/entry/post-channel)
    #[arg(long = "slack-username")]
    pub slack_user_name: Option<String>,

    /// Slack `channelName`
    #[arg(long)]
    pub slack_channel_name: Option<String>,

    /// Slack incoming webhook URL
    #[arg(long)]
    pub slack_url: Option<String>,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ChannelCreateArgs {
    /// ID for identifying the channel
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub fields: ChannelFields,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ChannelUpdateArgs {
    /// ID for identifying the channel
    #[arg(long)]
    pub id: String,

    #[command(flatten)]
    pub fields: ChannelFields,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ChannelIdArgs {
    /// ID for identifying the channel
    #[arg(long)]
    pub id: String,
}

// ---------------------------------------------------------------------------
// notification
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// Create notification
    Create(NotificationCreateArgs),

    /// Get notifications of a graph
    Get(NotificationGraphArgs),

    /// Update notification
    Update(NotificationUpdateArgs),

    /// Delete notification
    Delete(NotificationIdArgs),
}

/// Fields shared by notification create and update.
#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct NotificationFields {
    /// The name of the notification
    #[arg(long)]
    pub name: Option<String>,

    /// The target to be notified about
    #[arg(long)]
    pub target: Option<String>,

    /// Condition deciding whether to notify (>, =, <, multipleOf)
    #[arg(long)]
    pub condition: Option<String>,

    /// Threshold deciding whether to notify
    #[arg(long)]
    pub threshold: Option<String>,

    /// Time of day to remind at
    #[arg(long)]
    pub remind_by: Option<String>,

    /// ID of the channel to notify
    #[arg(long)]
    pub channel_id: Option<String>,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct NotificationCreateArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,

    /// ID for identifying the notification
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub fields: NotificationFields,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct NotificationUpdateArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,

    /// ID for identifying the notification
    #[arg(long)]
    pub id: String,

    #[command(flatten)]
    pub fields: NotificationFields,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct NotificationGraphArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct NotificationIdArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,

    /// ID for identifying the notification
    #[arg(long)]
    pub id: String,
}

// ---------------------------------------------------------------------------
// webhook
// ---------------------------------------------------------------------------

#[derive(Subcommand, Debug)]
pub enum WebhookCommand {
    /// Create webhook
    Create(WebhookCreateArgs),

    /// Get webhook definitions
    Get,

    /// Invoke webhook
    Invoke(WebhookHashArgs),

    /// Delete webhook
    Delete(WebhookHashArgs),
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct WebhookCreateArgs {
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: Option<String>,

    /// Behavior when invoked: increment, decrement, add, subtract, stopwatch
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Quantity for add and subtract webhooks
    #[arg(long)]
    pub quantity: Option<String>,
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct WebhookHashArgs {
    /// Webhook hash
    #[arg(long)]
    pub hash: String,
}
