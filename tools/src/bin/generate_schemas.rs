use std::{fs, io, path::PathBuf};

use schemars::{JsonSchema, schema::RootSchema, schema_for};
use serde::{Deserialize, Serialize};
use stagecraft::routes::openapi::ApiDoc;
use tracing::info;
use utoipa::OpenApi;

const ROOT_DIR: &str = env!("CARGO_MANIFEST_DIR");

fn main() {
    tracing_subscriber::fmt().init();
    let check_flag = std::env::args().any(|arg| &arg == "--check");
    let action = match check_flag {
        true => SchemaAction::CheckIfChanged,
        false => SchemaAction::Update,
    };
    generate_json_schema(action);
    generate_openapi(action);
}

/// Request bodies of every endpoint, in one schema so shared definitions
/// are not repeated.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
#[allow(dead_code)]
enum ApiTypes {
    CreateScene(stagecraft_api::CreateSceneRequest),
    UpdateScene(Box<stagecraft_api::UpdateSceneRequest>),
    ImportScene(Box<stagecraft_api::ImportSceneRequest>),
    AddElement(stagecraft_api::AddElementRequest),
    UpdateElement(Box<stagecraft_api::ElementPatchRequest>),
    MoveElement(stagecraft_api::MoveElementRequest),
}

fn generate_json_schema(action: SchemaAction) {
    let schema: RootSchema = schema_for!(ApiTypes);
    let json = serde_json::to_string_pretty(&schema).unwrap() + "\n";
    write_if_changed(json, "./schemas/api_types.schema.json", action);
}

fn generate_openapi(action: SchemaAction) {
    let json = ApiDoc::openapi().to_pretty_json().unwrap() + "\n";
    write_if_changed(json, "./schemas/openapi.json", action);
}

fn write_if_changed(json_current: String, path: &'static str, action: SchemaAction) {
    let root_dir: PathBuf = ROOT_DIR.into();
    let schema_path = root_dir.join(path);
    fs::create_dir_all(schema_path.parent().unwrap()).unwrap();

    let json_from_disk = match fs::read_to_string(&schema_path) {
        Ok(json) => json,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => panic!("{}", err),
    };

    if json_current == json_from_disk {
        return;
    }
    match action {
        SchemaAction::Update => {
            fs::write(&schema_path, &json_current).unwrap();
            info!(path, "Schema updated.");
        }
        SchemaAction::CheckIfChanged => {
            panic!("Schema {path} changed. Rerun without --check arg to regenerate it.")
        }
    }
}

#[derive(Clone, Copy)]
enum SchemaAction {
    Update,
    CheckIfChanged,
}
