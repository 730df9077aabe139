//! Management CLI for the admin suite (equivalent to Django's manage.py).

use admin_suite::apps::auth::forms::RegistrationForm;
use admin_suite::apps::auth::{
	Argon2Hasher, NewUser, PasswordHasher, ROLE_USER, SqliteUserRepository, UserRepository,
};
use admin_suite::conf::Settings;
use admin_suite::forms::{Form, FormData};
use admin_suite::{Container, Error, config, db, logging};
use clap::{Parser, Subcommand};
use console::style;
use std::net::SocketAddr;
use std::process;

#[derive(Parser)]
#[command(name = "manage")]
#[command(about = "Admin suite management interface", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the server
	Runserver {
		/// Address to bind, overriding the settings
		#[arg(long, value_name = "ADDRESS")]
		bind: Option<SocketAddr>,
	},

	/// Apply database migrations
	Migrate,

	/// Create a user account
	Createuser {
		#[arg(value_name = "USERNAME")]
		username: String,

		#[arg(long, value_name = "PASSWORD")]
		password: String,

		/// Role, e.g. ROLE_ADMIN
		#[arg(long, default_value = ROLE_USER)]
		role: String,
	},

	/// Display all registered URL patterns and the role they require
	Showurls,
}

async fn migrate(settings: &Settings) -> admin_suite::Result<()> {
	let pool = db::connect(&settings.database_url).await?;
	db::migrate(&pool).await?;
	println!("{} migrations applied", style("OK").green().bold());
	Ok(())
}

async fn createuser(
	settings: &Settings,
	username: String,
	password: String,
	role: String,
) -> admin_suite::Result<()> {
	let data = FormData::from_pairs([
		("username", username.as_str()),
		("password", password.as_str()),
		("password_confirm", password.as_str()),
	]);
	let registration = RegistrationForm::default().clean(&data).map_err(|errors| {
		let mut messages: Vec<String> = errors
			.as_map()
			.iter()
			.flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
			.collect();
		messages.sort();
		Error::Validation(messages.join("; "))
	})?;

	let pool = db::connect(&settings.database_url).await?;
	db::migrate(&pool).await?;
	let user = SqliteUserRepository::new(pool)
		.create(NewUser {
			username: registration.username,
			password: Argon2Hasher::new().hash(&registration.password)?,
			role,
		})
		.await?;
	println!(
		"{} created user {} ({})",
		style("OK").green().bold(),
		user.username,
		user.role
	);
	Ok(())
}

async fn showurls(settings: Settings) -> admin_suite::Result<()> {
	let pool = db::connect_in_memory().await?;
	let container = Container::new(settings, pool)?.into_shared();
	let router = config::urls::routes(&container);
	let access = config::urls::access_table();
	for route in router.routes() {
		let path = router.reverse(route.name).unwrap_or_default();
		println!(
			"{:<7} {:<28} {:<26} {}",
			route.method.as_str(),
			path,
			route.name,
			access.required_role(route.name).unwrap_or("-")
		);
	}
	Ok(())
}

async fn run() -> admin_suite::Result<()> {
	let cli = Cli::parse();
	let settings = Settings::load().map_err(|e| Error::Internal(e.to_string()))?;

	match cli.command {
		Commands::Runserver { bind } => {
			let mut settings = settings;
			if let Some(bind) = bind {
				settings.bind = bind;
			}
			config::serve(settings).await
		}
		Commands::Migrate => {
			logging::init(&settings);
			migrate(&settings).await
		}
		Commands::Createuser {
			username,
			password,
			role,
		} => {
			logging::init(&settings);
			createuser(&settings, username, password, role).await
		}
		Commands::Showurls => showurls(settings).await,
	}
}

#[tokio::main]
async fn main() {
	if let Err(e) = run().await {
		eprintln!("{} {}", style("Error:").red().bold(), e);
		process::exit(1);
	}
}
