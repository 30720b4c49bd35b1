use pdf_imposer::*;
use std::path::PathBuf;

#[test]
fn test_default_options() {
    let options = ConversionOptions::default();
    assert_eq!(options.conversion_type, ConversionType::Bookletize);
    assert_eq!(options.layout, "2x1");
    assert_eq!(options.paper_format, "A4");
    assert!(!options.copy_pages);
    assert!(options.input_file.is_none());
}

#[test]
fn test_validate_parses_layout_and_format() {
    let options = ConversionOptions {
        layout: " 4X2 ".to_string(),
        paper_format: "LetterR".to_string(),
        ..Default::default()
    };
    let config = options.validate().unwrap();
    assert_eq!(config.layout, Layout::new(4, 2).unwrap());
    assert_eq!(config.paper.size(), (792.0, 612.0));
    assert_eq!(config.paper.name, "LetterR");
}

#[test]
fn test_validate_rejects_bad_layout() {
    for layout in ["", "2", "0x1", "axb", "2x-1"] {
        let options = ConversionOptions {
            layout: layout.to_string(),
            ..Default::default()
        };
        match options.validate() {
            Err(ImposeError::Config(msg)) => assert!(msg.contains(layout.trim())),
            other => panic!("Expected Config error for {:?}, got {:?}", layout, other),
        }
    }
}

#[test]
fn test_unknown_format_message() {
    let err = ConversionConfig::new(ConversionType::Reduce, "2x1", "Folio", false).unwrap_err();
    assert_eq!(err.to_string(), "The page format \"Folio\" is unknown");
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_load_options() {
    use tempfile::NamedTempFile;

    let options = ConversionOptions {
        input_file: Some(PathBuf::from("thesis.pdf")),
        output_file: Some(PathBuf::from("thesis-booklet.pdf")),
        conversion_type: ConversionType::Linearize,
        layout: "1x2".to_string(),
        paper_format: "A5R".to_string(),
        copy_pages: true,
    };

    let temp = NamedTempFile::new().unwrap();
    options.save(temp.path()).await.unwrap();
    let loaded = ConversionOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), r#"{ "conversion_type": "Reduce" }"#).unwrap();

    let loaded = ConversionOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded.conversion_type, ConversionType::Reduce);
    assert_eq!(loaded.layout, "2x1");
    assert_eq!(loaded.paper_format, "A4");
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_malformed_config() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), "not json").unwrap();

    match ConversionOptions::load(temp.path()).await {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
