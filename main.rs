use std::{cell::RefCell, io::Read, path::PathBuf};

use clap::{Parser, Subcommand};

use astreams::{AliasMap, Callback, Entity, Registry, Resolver, TypeName, LD};

#[derive(Parser)]
/// inspect ActivityStreams documents
struct Args {
	#[clap(subcommand)]
	/// command to run
	command: Mode,

	/// path to config file, leave empty to not use any
	#[arg(short, long)]
	config: Option<PathBuf>,

	#[arg(long, default_value_t=false)]
	/// run with debug level tracing
	debug: bool,
}

#[derive(Clone, Subcommand)]
enum Mode {
	/// print current or default configuration
	Config,

	/// resolve a document's type and print it back as a json-ld document
	Resolve {
		/// document to read, stdin if not given
		path: Option<PathBuf>,

		#[arg(long, default_value_t = false)]
		/// sort non functional properties before printing, overrides config value
		normalize: bool,

		#[arg(long, default_value_t = false)]
		/// pretty print output json
		pretty: bool,
	},

	/// show which vocabulary aliases a document's @context declares
	Context {
		/// document to read, stdin if not given
		path: Option<PathBuf>,
	},
}

fn main() {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.compact()
		.with_writer(std::io::stderr)
		.with_max_level(if args.debug { tracing::Level::DEBUG } else { tracing::Level::INFO })
		.init();

	let mut config = astreams::Config::load(args.config.as_ref());

	let res = match args.command {
		Mode::Config => {
			println!("{}", toml::to_string_pretty(&config).expect("failed serializing config"));
			Ok(())
		},

		Mode::Resolve { path, normalize, pretty } => {
			config.resolver.normalize |= normalize;
			read_document(path.as_ref()).and_then(|doc| resolve(&doc, &config, pretty))
		},

		Mode::Context { path } => read_document(path.as_ref()).map(|doc| {
			let Some(context) = doc.get("@context") else {
				println!("no @context");
				return;
			};
			let aliases = AliasMap::parse(context, &config.context);
			for (key, value) in aliases.iter() {
				println!("{key} -> {value:?}");
			}
			println!("activitystreams alias: {:?}", aliases.activitystreams());
		}),
	};

	if let Err(e) = res {
		tracing::error!("{e}");
		std::process::exit(1);
	}
}

fn read_document(path: Option<&PathBuf>) -> Result<serde_json::Value, String> {
	let raw = match path {
		Some(path) => std::fs::read_to_string(path)
			.map_err(|e| format!("failed reading {}: {e}", path.display()))?,
		None => {
			let mut buf = String::new();
			std::io::stdin()
				.read_to_string(&mut buf)
				.map_err(|e| format!("failed reading stdin: {e}"))?;
			buf
		},
	};
	serde_json::from_str(&raw).map_err(|e| format!("invalid json document: {e}"))
}

fn resolve(doc: &serde_json::Value, config: &astreams::Config, pretty: bool) -> Result<(), String> {
	let registry = Registry::activitystreams();
	let callbacks = TypeName::ALL.iter().map(|t| {
		Callback::named(t.as_str(), |out: &RefCell<Option<Entity>>, entity: Entity| {
			*out.borrow_mut() = Some(entity);
			Ok(())
		})
	});
	let resolver = Resolver::new(&registry, callbacks)
		.map_err(|e| e.to_string())?
		.with_config(config);

	let out = RefCell::new(None);
	resolver.resolve_value(&out, doc).map_err(|e| e.to_string())?;
	let Some(entity) = out.into_inner() else {
		return Err("resolved without producing an entity".to_string());
	};

	tracing::info!("resolved {} (id: {:?})", entity.type_name(), entity.id().map(|x| x.as_str()));
	let ld = entity.ld_context();
	let printed = if pretty { serde_json::to_string_pretty(&ld) } else { serde_json::to_string(&ld) };
	println!("{}", printed.map_err(|e| e.to_string())?);
	Ok(())
}
