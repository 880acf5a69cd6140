use crate::analysis::Analysis;

pub const API_SPEC_VERSION: &str = "0.0.1";

/// OpenAPI document for the refinement endpoint.
///
/// The shape does not depend on the analysis contents.
pub fn render_api_spec(_analysis: &Analysis) -> String {
    format!(
        "openapi: 3.0.0
info:
  title: VIDEO2CODE Generated API
  version: {API_SPEC_VERSION}
paths:
  /refine:
    post:
      summary: Refine code with LLM
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                artifact: {{ type: string }}
                code: {{ type: string }}
                prompt: {{ type: string }}
      responses:
        '200':
          description: OK
          content:
            application/json:
              schema:
                type: object
                properties:
                  updatedCode: {{ type: string }}
"
    )
}
