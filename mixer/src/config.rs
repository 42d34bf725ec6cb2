use crate::anndata::SpatialImage;
use crate::common::*;
use crate::error::MixerError;
use crate::params::{GeneClustParams, Modality, Version};
use matrix_util::common_io::read_to_string;
use ndarray::Array3;
use serde_json::{Map, Value};
use std::str::FromStr;

const IMAGE_KEY: &str = "image";

/// Every key a parameter file may carry, in the order they are checked
/// (`version` and `modality` come before the unknown-key check)
const KNOWN_KEYS: [&str; 14] = [
    "version",
    "modality",
    "random_state",
    "max_workers",
    "return_info",
    "subset",
    "post_hoc_filtering",
    "n_gene_clusters",
    "shape",
    "alpha",
    "n_obs_clusters",
    "n_components",
    "relevant_gene_pct",
    IMAGE_KEY,
];

/// Keys read by GeneClust-ps only
pub const PS_ONLY_KEYS: [&str; 6] = [
    "shape",
    "alpha",
    "n_obs_clusters",
    "n_components",
    "relevant_gene_pct",
    IMAGE_KEY,
];

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A JSON integer. Booleans and numbers written with a fraction or an
/// exponent (`1.0`, `1e2`) are rejected.
fn json_int(name: &'static str, value: &Value) -> Result<i64, MixerError> {
    match value {
        Value::Number(n) if n.is_i64() => Ok(n.as_i64().unwrap_or_default()),
        Value::Number(n) if n.is_u64() => Err(MixerError::invalid_value(
            name,
            "to fit in a 64-bit signed integer",
            n,
        )),
        _ => Err(MixerError::wrong_type(
            name,
            "an integer",
            json_type_name(value),
        )),
    }
}

fn json_opt_int(name: &'static str, value: &Value) -> Result<Option<i64>, MixerError> {
    match value {
        Value::Null => Ok(None),
        _ => json_int(name, value).map(Some),
    }
}

fn json_bool(name: &'static str, value: &Value) -> Result<bool, MixerError> {
    value
        .as_bool()
        .ok_or_else(|| MixerError::wrong_type(name, "bool", json_type_name(value)))
}

fn json_float(name: &'static str, value: &Value) -> Result<f64, MixerError> {
    value
        .as_f64()
        .ok_or_else(|| MixerError::wrong_type(name, "a float number", json_type_name(value)))
}

fn json_enum<T>(name: &'static str, value: &Value) -> Result<T, MixerError>
where
    T: FromStr<Err = MixerError>,
{
    value
        .as_str()
        .ok_or_else(|| MixerError::wrong_type(name, "a string", json_type_name(value)))?
        .parse::<T>()
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, MixerError> {
    value
        .as_object()
        .ok_or_else(|| MixerError::wrong_type("params", "a JSON object", json_type_name(value)))
}

impl GeneClustParams {
    /// Overlay a JSON object on the defaults.
    ///
    /// `version` and `modality` are read first, then unknown keys are
    /// rejected. Each remaining key is type-checked against its
    /// parameter: integers must be JSON integers, flags JSON booleans,
    /// `alpha` any JSON number, and `shape` a string naming a variant.
    /// `null` only unsets `n_gene_clusters`, `n_obs_clusters`,
    /// `n_components` and `relevant_gene_pct`.
    ///
    /// Keys only GeneClust-ps reads ([`PS_ONLY_KEYS`]) are left at their
    /// defaults, unchecked, when `version` is `fast`. An `image` entry is
    /// ignored here; see [`embedded_image`].
    pub fn from_json(value: &Value) -> Result<Self, MixerError> {
        let obj = as_object(value)?;

        let mut params = Self::default();

        if let Some(x) = obj.get("version") {
            params.version = json_enum("version", x)?;
        }
        if let Some(x) = obj.get("modality") {
            params.modality = json_enum("modality", x)?;
        }

        if let Some(key) = obj.keys().find(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            return Err(MixerError::UnknownParameter(key.clone().into_boxed_str()));
        }

        for &key in KNOWN_KEYS.iter() {
            let Some(value) = obj.get(key) else {
                continue;
            };

            if params.version == Version::Fast && PS_ONLY_KEYS.contains(&key) {
                info!("GeneClust-fast ignores `{}`", key);
                continue;
            }

            match key {
                "shape" => params.shape = json_enum(key, value)?,
                "random_state" => params.random_state = json_int(key, value)?,
                "max_workers" => params.max_workers = json_int(key, value)?,
                "return_info" => params.return_info = json_bool(key, value)?,
                "subset" => params.subset = json_bool(key, value)?,
                "post_hoc_filtering" => params.post_hoc_filtering = json_bool(key, value)?,
                "n_gene_clusters" => params.n_gene_clusters = json_opt_int(key, value)?,
                "n_obs_clusters" => params.n_obs_clusters = json_opt_int(key, value)?,
                "n_components" => params.n_components = json_opt_int(key, value)?,
                "relevant_gene_pct" => params.relevant_gene_pct = json_opt_int(key, value)?,
                "alpha" => params.alpha = json_float(key, value)?,
                _ => {}
            }
        }

        Ok(params)
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Read an image given as nested numeric arrays, `height x width` or
/// `height x width x channels`. `null` means no image.
pub fn image_from_json(value: &Value) -> Result<Option<SpatialImage>, MixerError> {
    let not_an_array = || MixerError::wrong_type(IMAGE_KEY, "an ndarray", json_type_name(value));

    if value.is_null() {
        return Ok(None);
    }

    let mut shape = vec![];
    let mut cur = value;
    while let Value::Array(items) = cur {
        shape.push(items.len());
        match items.first() {
            Some(x) => cur = x,
            None => break,
        }
    }

    let mut pixels = Vec::with_capacity(shape.iter().product());
    if !flatten_nested(value, &shape, &mut pixels) {
        return Err(not_an_array());
    }

    let dim = match shape[..] {
        [h, w] => (h, w, 1),
        [h, w, c] => (h, w, c),
        _ => return Err(not_an_array()),
    };

    let pixels = Array3::from_shape_vec(dim, pixels).map_err(|_| not_an_array())?;
    Ok(Some(SpatialImage::new(pixels)))
}

/// Depth-first copy of a rectangular nested array of numbers
fn flatten_nested(value: &Value, shape: &[usize], out: &mut Vec<f32>) -> bool {
    match (value, shape.split_first()) {
        (Value::Array(items), Some((&n, rest))) => {
            items.len() == n && items.iter().all(|x| flatten_nested(x, rest, out))
        }
        (Value::Number(x), None) => match x.as_f64() {
            Some(x) => {
                out.push(x as f32);
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// The `image` entry of a parameter object, read only for
/// GeneClust-ps on spatial data; any other run ignores it unchecked
pub fn embedded_image(
    params: &GeneClustParams,
    value: &Value,
) -> Result<Option<SpatialImage>, MixerError> {
    if params.version != Version::Ps || params.modality != Modality::St {
        return Ok(None);
    }

    match value.get(IMAGE_KEY) {
        Some(img) => image_from_json(img),
        None => Ok(None),
    }
}

/// Read parameters, and an optional `image`, from a JSON file--either
/// gzipped or not
pub fn load_params_file(
    json_file: &str,
) -> anyhow::Result<(GeneClustParams, Option<SpatialImage>)> {
    info!("Reading parameters: {}", json_file);

    let value: Value = serde_json::from_str(&read_to_string(json_file)?)?;
    let params = GeneClustParams::from_json(&value)?;
    let image = embedded_image(&params, &value)?;

    if let Some(img) = image.as_ref() {
        info!("Found an embedded image of shape {:?}", img.shape());
    }

    Ok((params, image))
}
