//! Sample notebook seeded into the workspace

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{GlueError, Result};

const WELCOME_SOURCE: &[&str] = &[
    "import sys\n",
    "print(f\"Python version: {sys.version}\")\n\n",
    "try:\n",
    "    from pyspark.context import SparkContext\n",
    "    from awsglue.context import GlueContext\n",
    "    from awsglue.job import Job\n",
    "    \n",
    "    # Initialize Glue context\n",
    "    sc = SparkContext()\n",
    "    glueContext = GlueContext(sc)\n",
    "    spark = glueContext.spark_session\n",
    "    job = Job(glueContext)\n",
    "    \n",
    "    print(\"✨ Glue environment initialized successfully!\")\n",
    "except Exception as e:\n",
    "    print(f\"Error initializing Glue environment: {e}\")",
];

/// The welcome notebook as a JSON value
pub fn welcome_notebook() -> Value {
    json!({
        "cells": [
            {
                "cell_type": "code",
                "execution_count": null,
                "metadata": {},
                "source": WELCOME_SOURCE,
            }
        ],
        "metadata": {
            "kernelspec": {
                "display_name": "Python 3",
                "language": "python",
                "name": "python3"
            }
        },
        "nbformat": 4,
        "nbformat_minor": 4
    })
}

/// Render the welcome notebook the way Jupyter writes `.ipynb` files
/// (one-space indentation).
pub fn render_welcome_notebook() -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    welcome_notebook()
        .serialize(&mut ser)
        .map_err(|e| GlueError::Workspace(format!("cannot render notebook: {}", e)))?;
    String::from_utf8(buf).map_err(|e| GlueError::Workspace(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notebook_shape() {
        let nb = welcome_notebook();
        assert_eq!(nb["nbformat"], 4);
        assert_eq!(nb["nbformat_minor"], 4);
        assert_eq!(nb["metadata"]["kernelspec"]["name"], "python3");

        let cells = nb["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0]["cell_type"], "code");
        assert!(cells[0]["execution_count"].is_null());
    }

    #[test]
    fn test_rendered_notebook_parses_back() {
        let text = render_welcome_notebook().unwrap();
        assert!(text.starts_with("{\n \"cells\""));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, welcome_notebook());
        let source = parsed["cells"][0]["source"].as_array().unwrap();
        assert!(source[4].as_str().unwrap().contains("GlueContext"));
    }
}
