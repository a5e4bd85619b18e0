use std::collections::HashSet;
use std::env;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use serde::Deserialize;

use term_gen_core::error::GenerationError;
use term_gen_core::io::{list_files, normalize_folder, read_files, training_name};
use term_gen_core::model::generator::Generator;
use term_gen_core::model::generator_config::GeneratorConfig;

const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATA: &str = "./data";
const DATA_EXTENSION: &str = "txt";
/// Largest `count` accepted by `/v1/generate`.
const MAX_COUNT: i64 = 1000;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<i64>,
	nb_try: Option<usize>,
	unique: Option<bool>
}

#[derive(Deserialize)]
struct ModelQuery {
	names: Option<String>,
	exponent: Option<f64>
}

struct SharedData {
	data_folder: String,
	generator: Option<Generator>,
	model_names: Vec<String>
}

/// Draws one sequence, retrying up to `nb_try` times while it duplicates
/// an earlier result or a training sequence.
///
/// `seen` holds earlier results in `Generator::normalize` form.
///
/// After the last try the last draw is kept, like the first one would be
/// with `nb_try == 0`.
fn generate_unique(
	generator: &Generator,
	seen: &HashSet<String>,
	mut nb_try: usize,
) -> Result<String, GenerationError> {
	let mut word = generator.generate()?;
	while nb_try > 0 && (seen.contains(&Generator::normalize(&word)) || generator.is_known(&word)) {
		word = generator.generate()?;
		nb_try -= 1;
	}
	Ok(word)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` sequences from the loaded generator.
/// Returns the sequences as the response body, one per line.
/// A `count` above `MAX_COUNT` is rejected.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let count = query.count.unwrap_or(1);
	let nb_try = query.nb_try.unwrap_or(5);
	let unique = query.unique.unwrap_or(true);
	if count > MAX_COUNT {
		return HttpResponse::BadRequest().body(format!("count must be at most {MAX_COUNT}"));
	}

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let generator = match &shared_data.generator {
		Some(generator) => generator,
		None => return HttpResponse::Conflict().body("No model loaded"),
	};

	let result = if unique {
		let mut seen = HashSet::new();
		let mut words = Vec::new();
		for _ in 0..count.max(0) {
			match generate_unique(generator, &seen, nb_try) {
				Ok(word) => {
					seen.insert(Generator::normalize(&word));
					words.push(word);
				}
				Err(e) => return failed(e),
			}
		}
		Ok(words)
	} else {
		generator.generate_list(count)
	};

	match result {
		Ok(words) => HttpResponse::Ok().body(words.join("\n")),
		Err(e) => failed(e),
	}
}

fn failed(error: GenerationError) -> HttpResponse {
	warn!("generation failed: {error}");
	HttpResponse::InternalServerError().body(error.to_string())
}

#[get("/v1/models")]
async fn get_models(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let folder = match data.read() {
		Ok(m) => normalize_folder(&m.data_folder),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&folder, DATA_EXTENSION) {
		Ok(files) => HttpResponse::Ok().body(
			files
				.iter()
				.filter_map(training_name)
				.collect::<Vec<_>>()
				.join("\n"),
		),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models")
	}
}

#[get("/v1/loaded_models")]
async fn get_loaded_models(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.model_names.join("\n"))
}

/// HTTP GET endpoint `/v1/model`
///
/// Returns the raw counts of the loaded model as JSON.
#[get("/v1/model")]
async fn get_model(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.generator {
		Some(generator) => HttpResponse::Ok().json(generator.raw()),
		None => HttpResponse::Conflict().body("No model loaded"),
	}
}

#[put("/v1/load_models")]
async fn put_model(data: web::Data<RwLock<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};

	let config = match query.exponent {
		Some(exponent) => match GeneratorConfig::with_exponent(exponent) {
			Ok(config) => config,
			Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
		},
		None => GeneratorConfig::default(),
	};

	let model_names: Vec<String> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect();

	let folder = match data.read() {
		Ok(m) => normalize_folder(&m.data_folder),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let paths: Vec<_> = model_names
		.iter()
		.map(|name| folder.join(format!("{name}.{DATA_EXTENSION}")))
		.collect();
	let lines = match read_files(&paths) {
		Ok(lines) => lines,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load model: {e}"))
	};

	let generator = Generator::with_config(&lines, &config);
	info!(
		"loaded {:?}: {} sequences, exponent {}",
		model_names,
		generator.raw().source_count(),
		config.exponent()
	);

	// Readers keep the previous generator until the swap
	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.generator = Some(generator);
	shared_data.model_names = model_names;

	HttpResponse::Ok().body("Models loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with no model loaded; clients pick training files through
/// `/v1/load_models`.
///
/// # Notes
/// - The bind address comes from `TERM_GEN_ADDR` (default 127.0.0.1:5000).
/// - The training folder comes from `TERM_GEN_DATA` (default ./data).
/// - Log level follows `RUST_LOG`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let addr = env::var("TERM_GEN_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
	let data_folder = env::var("TERM_GEN_DATA").unwrap_or_else(|_| DEFAULT_DATA.to_owned());
	info!("serving training files from {data_folder} on {addr}");

	let shared_data = SharedData {
		data_folder,
		generator: None,
		model_names: Vec::new(),
	};
	let shared_model = web::Data::new(RwLock::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_models)
			.service(get_model)
			.service(put_model)
			.service(get_loaded_models)
	})
		.bind(addr)?
		.run()
		.await
}
