use image::RgbImage;
use serde_json::{json, Value};

// defaults matching the served stub model
const SERVER_URL: &str = "http://127.0.0.1:8000";
const MODEL_NAME: &str = "dumb_stub";
const MODEL_VERSION: &str = "1";
const OUTPUT_PATH: &str = "generated.png";

async fn is_model_ready(client: &reqwest::Client) -> bool {
    let url = format!("{SERVER_URL}/v2/models/{MODEL_NAME}/versions/{MODEL_VERSION}/ready");
    match client.get(url).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

async fn get_image(client: &reqwest::Client) -> Result<RgbImage, Box<dyn std::error::Error>> {
    let url = format!("{SERVER_URL}/v2/models/{MODEL_NAME}/versions/{MODEL_VERSION}/infer");
    let body = json!({
        "inputs": [{
            "name": "prompt",
            "shape": [1],
            "datatype": "BYTES",
            "data": ["beautiful picture"]
        }]
    });

    let response = client
        .post(url)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;
    let result: Value = response.json().await?;

    let output = result["outputs"]
        .as_array()
        .and_then(|outputs| outputs.iter().find(|t| t["name"] == "image"))
        .ok_or("no \"image\" output in response")?;

    image_from_output(output)
}

fn image_from_output(output: &Value) -> Result<RgbImage, Box<dyn std::error::Error>> {
    let shape: Vec<u64> = output["shape"]
        .as_array()
        .map(|s| s.iter().filter_map(Value::as_u64).collect())
        .ok_or("image output has no shape")?;
    let &[height, width, channels] = shape.as_slice() else {
        return Err(format!("unexpected image shape: {shape:?}").into());
    };
    if channels != 3 {
        return Err(format!("expected 3 channels, got {channels}").into());
    }

    let data: Vec<u8> = output["data"]
        .as_array()
        .ok_or("image output has no data")?
        .iter()
        .map(|value| {
            value
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(|| format!("image data contains a non-byte value: {value}"))
        })
        .collect::<Result<_, _>>()?;

    RgbImage::from_raw(width as u32, height as u32, data)
        .ok_or_else(|| "image payload does not match its shape".into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    println!("Send test request");
    println!("Wait for response...");

    if !is_model_ready(&client).await {
        println!("Model is not ready... Check your server");
        return Ok(());
    }

    let image = get_image(&client).await?;
    println!("Got image from server");

    image.save(OUTPUT_PATH)?;
    println!(
        "Saved {}x{} image to {OUTPUT_PATH}",
        image.width(),
        image.height()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::image_from_output;
    use serde_json::json;

    #[test]
    fn valid_output_reassembles_into_an_image() {
        let output = json!({
            "name": "image",
            "shape": [1, 2, 3],
            "datatype": "UINT8",
            "data": [10, 20, 30, 40, 50, 60]
        });
        let image = image_from_output(&output).unwrap();
        assert_eq!((image.width(), image.height()), (2, 1));
    }

    #[test]
    fn oversized_data_values_are_rejected() {
        let output = json!({
            "name": "image",
            "shape": [1, 1, 3],
            "datatype": "UINT8",
            "data": [300, 0, 0]
        });
        let error = image_from_output(&output).unwrap_err();
        assert!(error.to_string().contains("non-byte value"));
    }

    #[test]
    fn non_numeric_data_values_are_rejected() {
        let output = json!({
            "name": "image",
            "shape": [1, 1, 3],
            "datatype": "UINT8",
            "data": [0, "oops", 0]
        });
        assert!(image_from_output(&output).is_err());
    }
}
