use crate::analysis::Analysis;

/// NestJS controller stub for the refinement endpoint. Echoes the input code.
pub fn render_backend(_analysis: &Analysis) -> String {
    "import { Body, Controller, Post } from '@nestjs/common'

interface RefineRequest {
  artifact?: string
  code?: string
  prompt?: string
}

@Controller('refine')
export class RefineController {
  @Post()
  refine(@Body() body: RefineRequest) {
    return { updatedCode: body?.code ?? '' }
  }
}
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::render_backend;
    use crate::analysis::Analysis;

    #[test]
    fn stub_echoes_code() {
        let source = render_backend(&Analysis::default());
        assert!(source.contains("@Controller('refine')"));
        assert!(source.contains("return { updatedCode: body?.code ?? '' }"));
    }
}
