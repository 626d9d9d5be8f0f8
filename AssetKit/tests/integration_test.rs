use assetkit::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn pack_to_container(dir: &Path, scene: &Value) -> (PackResult, GlbContainer, Vec<u8>) {
    let input = dir.join("scene.gltf");
    let output = dir.join("out.glb");
    write_json(&input, scene);

    let result = convert_gltf_to_glb(&input, &output).unwrap();
    let bytes = fs::read(&output).unwrap();
    let container = read_glb(&bytes).unwrap();
    (result, container, bytes)
}

fn uri_at(container: &GlbContainer, section: &str, index: usize) -> String {
    container.json[section][index]["uri"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_single_texture_scenario() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tex.png"), [0xFFu8; 10]).unwrap();

    let (result, container, bytes) =
        pack_to_container(dir.path(), &json!({"images": [{"uri": "tex.png"}]}));

    let chunk_length = container.json_chunk().length as usize;
    assert_eq!(bytes.len(), 20 + chunk_length);
    assert_eq!(result.output_size as usize, bytes.len());
    assert_eq!(result.images_embedded, 1);
    assert!(result.warnings.is_empty());

    let uri = uri_at(&container, "images", 0);
    assert!(uri.starts_with("data:image/png;base64,"));
    let decoded = decode_data_uri(&uri).unwrap();
    assert_eq!(decoded.data, vec![0xFF; 10]);
}

#[test]
fn test_round_trip_many_images() {
    let dir = tempdir().unwrap();
    let payloads: Vec<(String, Vec<u8>)> = (0..5u8)
        .map(|i| {
            let ext = if i % 2 == 0 { "png" } else { "jpg" };
            let data: Vec<u8> = (0..=i).map(|b| b.wrapping_mul(37)).chain([i; 7]).collect();
            (format!("tex_{i}.{ext}"), data)
        })
        .collect();
    for (name, data) in &payloads {
        fs::write(dir.path().join(name), data).unwrap();
    }

    let images: Vec<Value> = payloads.iter().map(|(name, _)| json!({"uri": name})).collect();
    let (result, container, _) = pack_to_container(dir.path(), &json!({"images": images}));

    assert_eq!(result.images_embedded, payloads.len());
    for (i, (name, data)) in payloads.iter().enumerate() {
        let decoded = decode_data_uri(&uri_at(&container, "images", i)).unwrap();
        let expected_mime = if name.ends_with(".jpg") { "image/jpeg" } else { "image/png" };
        assert_eq!(decoded.mime, expected_mime);
        assert_eq!(&decoded.data, data);
    }
}

#[test]
fn test_padding_invariant() {
    let dir = tempdir().unwrap();
    // Vary the name length so the JSON length hits every residue mod 4
    for n in 0..8 {
        let name = "x".repeat(n);
        let (result, container, bytes) =
            pack_to_container(dir.path(), &json!({"asset": {"version": "2.0"}, "name": name}));

        let chunk_length = container.json_chunk().length as usize;
        assert_eq!(chunk_length % 4, 0);
        assert_eq!(chunk_length, container.total_length as usize - 20);
        assert_eq!(bytes.len(), container.total_length as usize);
        assert_eq!(result.layout.padding, chunk_length - result.layout.json_length);
        assert!(bytes[20 + result.layout.json_length..].iter().all(|&b| b == b' '));
    }
}

#[test]
fn test_missing_texture_tolerated() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("present.png"), b"png").unwrap();

    let scene = json!({"images": [{"uri": "missing.png"}, {"uri": "present.png"}]});
    let (result, container, _) = pack_to_container(dir.path(), &scene);

    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("missing.png"));
    assert_eq!(result.images_embedded, 1);
    assert_eq!(uri_at(&container, "images", 0), "missing.png");
    assert!(uri_at(&container, "images", 1).starts_with("data:image/png;base64,"));
}

#[test]
fn test_missing_buffer_tolerated() {
    let dir = tempdir().unwrap();
    let scene = json!({"buffers": [{"uri": "scene.bin", "byteLength": 64}]});
    let (result, container, _) = pack_to_container(dir.path(), &scene);

    assert_eq!(result.buffers_embedded, 0);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(uri_at(&container, "buffers", 0), "scene.bin");
}

#[test]
fn test_no_resources_keeps_document() {
    let dir = tempdir().unwrap();
    let scene = json!({
        "asset": {"version": "2.0", "generator": "test"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"name": "Root"}]
    });

    let (result, container, _) = pack_to_container(dir.path(), &scene);

    assert_eq!(result.images_total, 0);
    assert_eq!(result.buffers_total, 0);
    assert_eq!(container.chunks().len(), 1);
    assert_eq!(container.json, scene);
}

#[test]
fn test_second_pass_is_unchanged() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("tex.jpeg"), [1u8, 2, 3, 4, 5]).unwrap();
    fs::write(dir.path().join("mesh.bin"), [0u8; 12]).unwrap();

    let first_in = dir.path().join("scene.gltf");
    let first_out = dir.path().join("first.glb");
    write_json(
        &first_in,
        &json!({"images": [{"uri": "tex.jpeg"}], "buffers": [{"uri": "mesh.bin", "byteLength": 12}]}),
    );
    convert_gltf_to_glb(&first_in, &first_out).unwrap();
    let first = read_glb_file(&first_out).unwrap();

    // Feed the inlined JSON back through the packer
    let second_in = dir.path().join("inlined.gltf");
    let second_out = dir.path().join("second.glb");
    write_json(&second_in, &first.json);
    let result = convert_gltf_to_glb(&second_in, &second_out).unwrap();
    let second = read_glb_file(&second_out).unwrap();

    assert_eq!(result.images_embedded, 0);
    assert_eq!(result.buffers_embedded, 0);
    assert_eq!(second.json, first.json);
    assert_eq!(fs::read(&first_out).unwrap(), fs::read(&second_out).unwrap());
}

#[test]
fn test_index_preservation() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.png"), b"bbb").unwrap();
    fs::write(dir.path().join("geo.bin"), b"geometry").unwrap();

    let scene = json!({
        "materials": [{"pbrMetallicRoughness": {"baseColorTexture": {"index": 1}}}],
        "textures": [{"source": 2}, {"source": 0}],
        "images": [
            {"uri": "b.png", "name": "first"},
            {"uri": "absent.png", "name": "second"},
            {"uri": "data:image/png;base64,AAAA", "name": "third"}
        ],
        "buffers": [
            {"uri": "geo.bin", "byteLength": 8},
            {"byteLength": 4}
        ]
    });

    let (_, container, _) = pack_to_container(dir.path(), &scene);
    let out = &container.json;

    let names: Vec<&str> = out["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["first", "second", "third"]);
    assert_eq!(out["buffers"].as_array().unwrap().len(), 2);
    assert_eq!(out["buffers"][1], json!({"byteLength": 4}));
    assert_eq!(out["textures"], scene["textures"]);
    assert_eq!(out["materials"], scene["materials"]);
    assert_eq!(out["images"][2], scene["images"][2]);
}

#[test]
fn test_resource_dir_override() {
    let dir = tempdir().unwrap();
    let textures = dir.path().join("textures");
    fs::create_dir(&textures).unwrap();
    fs::write(textures.join("skin.png"), b"skin").unwrap();

    let input = dir.path().join("scene.gltf");
    let output = dir.path().join("out.glb");
    write_json(&input, &json!({"images": [{"uri": "skin.png"}]}));

    let result = pack(&PackOptions::new(&input, &output).with_resource_dir(&textures)).unwrap();
    assert_eq!(result.images_embedded, 1);
}

#[test]
fn test_output_is_overwritten() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("scene.gltf");
    let output = dir.path().join("out.glb");
    write_json(&input, &json!({"asset": {"version": "2.0"}}));
    fs::write(&output, vec![0xAB; 4096]).unwrap();

    let result = convert_gltf_to_glb(&input, &output).unwrap();
    assert_eq!(fs::metadata(&output).unwrap().len(), result.output_size);
    assert!(result.output_size < 4096);
}

#[test]
fn test_fatal_errors() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.glb");

    let missing = convert_gltf_to_glb(dir.path().join("nope.gltf"), &output);
    assert!(matches!(missing, Err(Error::DocumentNotFound { .. })));

    let broken = dir.path().join("broken.gltf");
    fs::write(&broken, "{\"images\": [").unwrap();
    assert!(matches!(
        convert_gltf_to_glb(&broken, &output),
        Err(Error::JsonError(_))
    ));
    assert!(!output.exists());

    let input = dir.path().join("scene.gltf");
    write_json(&input, &json!({}));
    let unwritable = dir.path().join("no_such_dir").join("out.glb");
    assert!(matches!(
        convert_gltf_to_glb(&input, unwritable),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_bind_then_pack() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("body.png"), b"body-pixels").unwrap();

    let scene = dir.path().join("scene.gltf");
    write_json(
        &scene,
        &json!({
            "materials": [{"name": "MI_Avatar_Body"}, {"name": "MI_Avatar_Cloak"}],
            "textures": [{"source": 0}],
            "images": [{"uri": "body.png"}]
        }),
    );

    let mapping = TextureMapping::new().with("Body", 0);
    let bound = fix_material_bindings(&BindOptions::new(&scene).with_mapping(mapping)).unwrap();
    assert_eq!(bound.output, dir.path().join("scene_fixed.gltf"));
    assert_eq!(bound.result.bound_count(), 1);

    let glb = dir.path().join("test_model.glb");
    convert_gltf_to_glb(&bound.output, &glb).unwrap();
    let container = read_glb_file(&glb).unwrap();

    assert_eq!(
        container.json["materials"][0]["pbrMetallicRoughness"]["baseColorTexture"],
        json!({"index": 0})
    );
    assert_eq!(
        container.json["materials"][1]["pbrMetallicRoughness"],
        json!({"baseColorFactor": [1.0, 1.0, 1.0, 1.0]})
    );
    let decoded = decode_data_uri(container.json["images"][0]["uri"].as_str().unwrap()).unwrap();
    assert_eq!(decoded.data, b"body-pixels");
}

#[test]
fn test_bind_requires_sections() {
    let dir = tempdir().unwrap();
    let scene = dir.path().join("scene.gltf");
    write_json(&scene, &json!({"materials": [{"name": "Body"}]}));

    let err = fix_material_bindings(&BindOptions::new(&scene)).unwrap_err();
    assert!(matches!(err, Error::MissingSection { section: "textures" }));
    assert!(!dir.path().join("scene_fixed.gltf").exists());
}

#[test]
fn test_pipeline_manifest_run() {
    let dir = tempdir().unwrap();
    let assets = dir.path().join("assets/avatars/3d");
    fs::create_dir_all(&assets).unwrap();
    fs::write(assets.join("head.jpg"), b"head").unwrap();
    write_json(
        &assets.join("scene.gltf"),
        &json!({
            "materials": [{"name": "Head"}],
            "textures": [{"source": 0}],
            "images": [{"uri": "head.jpg"}]
        }),
    );

    let icons = dir.path().join("icons");
    fs::create_dir(&icons).unwrap();
    fs::write(dir.path().join("icon.png"), b"icon").unwrap();

    let manifest = dir.path().join("pipeline.toml");
    fs::write(
        &manifest,
        r#"
[icon]
enabled = true
source = "icon.png"
destination = "icons"

[[bind.mapping]]
pattern = "Head"
texture = 0
"#,
    )
    .unwrap();

    let config = PipelineConfig::load(&manifest).unwrap();
    let report = run_pipeline(&config).unwrap();

    let (icon_path, _) = report.icon.unwrap();
    assert_eq!(icon_path, icons.join("icon.png"));
    assert_eq!(report.bind.unwrap().result.bound_count(), 1);

    let packed = report.pack.unwrap();
    assert_eq!(packed.output, assets.join("test_model.glb"));
    assert!(packed.warnings.is_empty());

    let container = read_glb_file(assets.join("test_model.glb")).unwrap();
    let uri = container.json["images"][0]["uri"].as_str().unwrap();
    assert_eq!(decode_data_uri(uri).unwrap().mime, "image/jpeg");
    assert_eq!(
        container.json["materials"][0]["pbrMetallicRoughness"]["baseColorTexture"]["index"],
        0
    );
}

#[test]
fn test_pipeline_packs_bound_scene_from_custom_input() {
    let dir = tempdir().unwrap();
    let models = dir.path().join("models");
    fs::create_dir(&models).unwrap();
    fs::write(models.join("hero_body.png"), b"hero").unwrap();
    write_json(
        &models.join("hero.gltf"),
        &json!({
            "materials": [{"name": "Hero_Body"}],
            "textures": [{"source": 0}],
            "images": [{"uri": "hero_body.png"}]
        }),
    );

    // Stale file at the default location must not be picked up
    let default_dir = dir.path().join("assets/avatars/3d");
    fs::create_dir_all(&default_dir).unwrap();
    write_json(&default_dir.join("scene_fixed.gltf"), &json!({"asset": {"version": "stale"}}));

    let manifest = dir.path().join("pipeline.toml");
    fs::write(
        &manifest,
        r#"
[bind]
input = "models/hero.gltf"

[[bind.mapping]]
pattern = "Body"
texture = 0

[pack]
output = "models/hero.glb"
"#,
    )
    .unwrap();

    let config = PipelineConfig::load(&manifest).unwrap();
    assert_eq!(config.pack_input(), models.join("scene_fixed.gltf"));

    let report = run_pipeline(&config).unwrap();
    assert_eq!(report.bind.unwrap().output, models.join("scene_fixed.gltf"));
    assert_eq!(report.pack.unwrap().images_embedded, 1);

    let container = read_glb_file(models.join("hero.glb")).unwrap();
    assert_eq!(container.json.get("asset"), None);
    assert_eq!(
        container.json["materials"][0]["pbrMetallicRoughness"]["baseColorTexture"]["index"],
        0
    );
}

#[test]
fn test_missing_manifest() {
    let dir = tempdir().unwrap();
    let err = PipelineConfig::load(dir.path().join("pipeline.toml")).unwrap_err();
    assert!(matches!(err, Error::ManifestNotFound { .. }));
}

#[test]
fn test_copy_icon_missing_source() {
    let dir = tempdir().unwrap();
    let err = copy_icon(dir.path().join("app_icon.png"), PathBuf::from("unused.png")).unwrap_err();
    assert!(matches!(err, Error::SourceNotFound { .. }));
}
