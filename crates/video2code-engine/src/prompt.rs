use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use video2code_contracts::refine::RefineRequest;

use crate::error::EngineError;
use crate::frames::{Frame, FrameProvider, FRAME_MIME_TYPE};

pub const SYSTEM_PROMPT: &str = "You extract UI components from provided screenshots.";

pub const SCHEMA_CONTRACT: &str = "Return JSON {screens:[{id:number,components:[{type:string,label?:string}]}],actions:string[]}";

const JSON_ONLY: &str = "Respond with the JSON object only, without prose or code fences.";

const REFINE_SYSTEM_PROMPT: &str =
    "You are a code editor. Modify the code as requested and reply with the full updated code only.";

/// Chat messages asking the model to describe `frames`.
///
/// Frame bytes are inlined as base64 data URIs so the request carries no
/// external references. Output depends only on the frames and their bytes.
pub fn build_messages(
    frames: &[Frame],
    source: &dyn FrameProvider,
) -> Result<Vec<Value>, EngineError> {
    let names = frames
        .iter()
        .map(Frame::file_name)
        .collect::<Vec<String>>()
        .join(", ");
    let mut parts = vec![
        json!({
            "type": "text",
            "text": format!("Frames ({}): {names}", frames.len()),
        }),
        json!({
            "type": "text",
            "text": format!("Schema: {SCHEMA_CONTRACT}\n{JSON_ONLY}"),
        }),
    ];
    for frame in frames {
        let bytes = source.read_frame(frame)?;
        parts.push(image_part(FRAME_MIME_TYPE, &bytes));
    }

    Ok(vec![
        json!({"role": "system", "content": SYSTEM_PROMPT}),
        json!({"role": "user", "content": parts}),
    ])
}

pub fn refine_messages(request: &RefineRequest) -> Vec<Value> {
    vec![
        json!({"role": "system", "content": REFINE_SYSTEM_PROMPT}),
        json!({
            "role": "user",
            "content": format!(
                "Artifact: {}\nPrompt: {}\n\nCode:\n{}",
                request.artifact, request.prompt, request.code
            ),
        }),
    ]
}

fn image_part(mime: &str, bytes: &[u8]) -> Value {
    json!({
        "type": "image_url",
        "image_url": {
            "url": format!("data:{mime};base64,{}", BASE64.encode(bytes)),
        }
    })
}
