//! API documentation endpoints
//!
//! Serves a static OpenAPI document plus Swagger UI and ReDoc pages that
//! load their assets from CDN and read the schema from /openapi.json.

use serde_json::{Value, json};

const SWAGGER_UI_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/3.24.2/swagger-ui.css";
const SWAGGER_UI_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/3.24.2/swagger-ui-bundle.js";
const REDOC_JS: &str = "https://cdn.jsdelivr.net/npm/redoc@next/bundles/redoc.standalone.js";

/// The OpenAPI 3.0 schema for the file endpoints
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "File server",
            "version": "2.0.0",
            "description": "API documentation"
        },
        "paths": {
            "/files/upload-file/{file_path}": {
                "post": {
                    "summary": "Upload a file",
                    "parameters": [{
                        "name": "file_path",
                        "in": "path",
                        "required": true,
                        "description": "Directory path the file is stored under",
                        "schema": {"type": "string"}
                    }],
                    "requestBody": {
                        "content": {
                            "multipart/form-data": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "file": {"type": "string", "format": "binary"}
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {"description": "Upload status"}
                    }
                }
            },
            "/files/get-file/{file_path}": {
                "get": {
                    "summary": "List a directory or fetch a markup document",
                    "parameters": [{
                        "name": "file_path",
                        "in": "path",
                        "required": true,
                        "description": "Directory or document path",
                        "schema": {"type": "string"}
                    }],
                    "responses": {
                        "200": {"description": "Directory listing page or raw document"}
                    }
                }
            }
        }
    })
}

/// Swagger UI page backed by /openapi.json
pub fn swagger_page() -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>docs</title>\n\
         <link rel=\"stylesheet\" href=\"{SWAGGER_UI_CSS}\">\n</head>\n<body>\n\
         <div id=\"swagger-ui\"></div>\n\
         <script src=\"{SWAGGER_UI_JS}\"></script>\n\
         <script>\nSwaggerUIBundle({{url: '/openapi.json', dom_id: '#swagger-ui'}});\n</script>\n\
         </body>\n</html>\n"
    )
}

/// ReDoc page backed by /openapi.json
pub fn redoc_page() -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>redoc</title>\n</head>\n<body>\n\
         <redoc spec-url=\"/openapi.json\"></redoc>\n\
         <script src=\"{REDOC_JS}\"></script>\n\
         </body>\n</html>\n"
    )
}
