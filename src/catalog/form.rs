use std::collections::HashMap;

use axum::http::HeaderMap;
use bytes::Bytes;
use serde_json::Value;

/// A file part from a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub data: Bytes,
}

/// Text fields and file parts of a catalog create/update request.
#[derive(Debug, Clone, Default)]
pub struct CatalogForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl CatalogForm {
    pub fn images(&self) -> impl Iterator<Item = &UploadedFile> {
        self.files.iter().filter(|f| f.field == "images")
    }
}

/// Parse a request body based on Content-Type. Only multipart bodies can carry images.
pub async fn parse(headers: &HeaderMap, body: Bytes) -> Result<CatalogForm, String> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json");

    if content_type.contains("multipart/form-data") {
        parse_multipart(content_type, body).await
    } else if content_type.contains("application/x-www-form-urlencoded") {
        Ok(parse_form_urlencoded(&body))
    } else if content_type.contains("application/json") {
        parse_json(&body)
    } else {
        Err(format!("Unsupported content type: {content_type}"))
    }
}

fn parse_json(body: &[u8]) -> Result<CatalogForm, String> {
    if body.is_empty() {
        return Ok(CatalogForm::default());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?;
    let Value::Object(map) = value else {
        return Err("JSON body must be an object".to_string());
    };

    let fields = map
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::Null => None,
            Value::String(s) => Some((k, s)),
            other => Some((k, other.to_string())),
        })
        .collect();

    Ok(CatalogForm {
        fields,
        files: Vec::new(),
    })
}

fn parse_form_urlencoded(body: &[u8]) -> CatalogForm {
    let fields = form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    CatalogForm {
        fields,
        files: Vec::new(),
    }
}

async fn parse_multipart(content_type: &str, body: Bytes) -> Result<CatalogForm, String> {
    let boundary =
        multer::parse_boundary(content_type).map_err(|_| "Missing multipart boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut form = CatalogForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let name = field.name().unwrap_or("unknown").to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let data = field
                .bytes()
                .await
                .map_err(|e| format!("File read error: {e}"))?;
            form.files.push(UploadedFile {
                field: name,
                file_name: Some(file_name),
                data,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| format!("Field read error: {e}"))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[tokio::test]
    async fn json_values_become_strings() {
        let body = Bytes::from(r#"{"name":"Box","price":12.5,"popular":true,"description":null}"#);
        let form = parse(&headers("application/json"), body).await.unwrap();
        assert_eq!(form.fields["name"], "Box");
        assert_eq!(form.fields["price"], "12.5");
        assert_eq!(form.fields["popular"], "true");
        assert!(!form.fields.contains_key("description"));
    }

    #[tokio::test]
    async fn json_array_rejected() {
        assert!(
            parse(&headers("application/json"), Bytes::from("[1,2]"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn urlencoded_fields() {
        let body = Bytes::from("name=Gift+box&price=10");
        let form = parse(&headers("application/x-www-form-urlencoded"), body)
            .await
            .unwrap();
        assert_eq!(form.fields["name"], "Gift box");
        assert_eq!(form.fields["price"], "10");
    }

    #[tokio::test]
    async fn multipart_splits_text_and_files() {
        let body = concat!(
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"name\"\r\n\r\n",
            "Macarons\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"images\"; filename=\"a.png\"\r\n",
            "Content-Type: image/png\r\n\r\n",
            "PNGDATA\r\n",
            "--XBOUNDARY--\r\n",
        );
        let form = parse(
            &headers("multipart/form-data; boundary=XBOUNDARY"),
            Bytes::from(body),
        )
        .await
        .unwrap();

        assert_eq!(form.fields["name"], "Macarons");
        let images: Vec<_> = form.images().collect();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].file_name.as_deref(), Some("a.png"));
        assert_eq!(&images[0].data[..], b"PNGDATA");
    }

    #[tokio::test]
    async fn unknown_content_type_rejected() {
        assert!(parse(&headers("text/plain"), Bytes::from("hi")).await.is_err());
    }
}
