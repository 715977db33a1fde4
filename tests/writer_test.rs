//! Tests for XmlConfigurationWriter and DocumentSerializer

mod common;

use std::io::Write;
use std::sync::Arc;

use common::{config_map, options_without_comment, BrokenFactory, Call, RecordingFactory};
use xmlcfg::application::{
    ApplicationError, ConfigurationWriter, DocumentSerializer, WriterOptions,
    XmlConfigurationWriter,
};
use xmlcfg::domain::{
    ConfigMap, ConfigTree, DomainError, FormatOptions, NewlineHandling, TreeBuilder,
};
use xmlcfg::infrastructure::xml::XmlElementWriter;
use xmlcfg::util::testing;

fn render(options: WriterOptions, pairs: &[(&str, &str)]) -> String {
    let writer = XmlConfigurationWriter::new(options);
    String::from_utf8(writer.render(&config_map(pairs)).unwrap()).unwrap()
}

#[test]
fn given_default_options_when_created_then_uses_configuration_root_and_comment() {
    let writer = XmlConfigurationWriter::default();

    assert_eq!(writer.options().root_name, "configuration");
    assert!(writer.options().write_comment);
    assert!(writer.options().format.indent);
}

#[test]
fn given_sibling_keys_when_rendering_then_writes_nested_document() {
    // Arrange
    testing::init_test_setup();

    // Act
    let xml = render(options_without_comment(), &[("a:b", "1"), ("a:c", "2")]);

    // Assert
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <configuration>\n  \
         <a>\n    \
         <b>1</b>\n    \
         <c>2</c>\n  \
         </a>\n\
         </configuration>"
    );
}

#[test]
fn given_empty_mapping_when_rendering_then_writes_only_root() {
    let xml = render(options_without_comment(), &[]);

    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<configuration></configuration>"
    );
}

#[test]
fn given_empty_value_without_children_when_rendering_then_element_has_no_whitespace() {
    // Act
    let xml = render(options_without_comment(), &[("a:empty", ""), ("a:b", "1")]);

    // Assert
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <configuration>\n  \
         <a>\n    \
         <empty></empty>\n    \
         <b>1</b>\n  \
         </a>\n\
         </configuration>"
    );
}

#[test]
fn given_key_segment_not_an_xml_name_when_rendering_then_invalid_key_before_output() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let writer = XmlConfigurationWriter::with_factory(options_without_comment(), factory.clone());

    // Act
    let result = writer.render(&config_map(&[("my key", "v"), ("1st<x", "y")]));

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidKey { .. }))
    ));
    assert_eq!(factory.created(), 0);
}

#[test]
fn given_tree_with_invalid_element_name_when_serializing_then_xml_writer_rejects_it() {
    // Arrange
    let mut tree = ConfigTree::new("settings");
    let root = tree.root();
    tree.insert_node("my key", Some("v"), root);
    let serializer = DocumentSerializer::new(false, FormatOptions::default());
    let mut out = XmlElementWriter::new(Vec::new(), serializer.format()).unwrap();

    // Act
    let err = serializer.serialize(&tree, &mut out).unwrap_err();

    // Assert
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    let xml = String::from_utf8(out.into_inner()).unwrap();
    assert!(!xml.contains("my key"));
}

#[test]
fn given_node_with_children_and_value_when_rendering_then_text_follows_children() {
    // Act
    let xml = render(
        options_without_comment(),
        &[
            ("test:element", "value"),
            ("test:element2", "value2"),
            ("test", "updateValue"),
        ],
    );

    // Assert
    assert!(xml.contains("<element>value</element>"));
    assert!(xml.contains("<element2>value2</element2>updateValue</test>"));
}

#[test]
fn given_custom_root_when_rendering_then_root_element_renamed() {
    let xml = render(
        WriterOptions {
            root_name: "root".into(),
            ..options_without_comment()
        },
        &[("x", "y")],
    );

    assert!(xml.contains("<root>"));
    assert!(xml.contains("<x>y</x>"));
    assert!(xml.ends_with("</root>"));
    assert!(!xml.contains("configuration"));
}

#[test]
fn given_indent_disabled_when_rendering_then_writes_compact_document() {
    let options = WriterOptions {
        format: FormatOptions {
            indent: false,
            ..FormatOptions::default()
        },
        ..options_without_comment()
    };

    let xml = render(options, &[("a:b", "1")]);

    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><configuration><a><b>1</b></a></configuration>"
    );
}

#[test]
fn given_value_with_markup_when_rendering_then_escapes_text() {
    let xml = render(options_without_comment(), &[("conn", "a<b&c")]);

    assert!(xml.contains("<conn>a&lt;b&amp;c</conn>"));
}

#[test]
fn given_empty_value_when_rendering_then_writes_no_text() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let writer = XmlConfigurationWriter::with_factory(options_without_comment(), factory.clone());

    // Act
    writer.render(&config_map(&[("empty", "")])).unwrap();

    // Assert
    assert!(!factory
        .calls()
        .iter()
        .any(|c| matches!(c, Call::Text(_))));
}

#[test]
fn given_comment_enabled_when_writing_then_comment_follows_declaration() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let writer = XmlConfigurationWriter::with_factory(WriterOptions::default(), factory.clone());

    // Act
    writer.render(&config_map(&[])).unwrap();

    // Assert
    let calls = factory.calls();
    assert_eq!(calls[0], Call::StartDocument);
    match &calls[1] {
        Call::Comment(text) => assert!(text.starts_with("Auto generated by xmlcfg on ")),
        other => panic!("expected comment, got {other:?}"),
    }
    assert_eq!(calls.last(), Some(&Call::EndDocument));
}

#[test]
fn given_comment_disabled_when_writing_then_no_comment_written() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let writer = XmlConfigurationWriter::with_factory(
        WriterOptions {
            root_name: "root".into(),
            ..options_without_comment()
        },
        factory.clone(),
    );

    // Act
    writer.render(&ConfigMap::new()).unwrap();

    // Assert
    assert_eq!(
        factory.calls(),
        vec![
            Call::StartDocument,
            Call::Start("root".into()),
            Call::End("root".into()),
            Call::EndDocument,
        ]
    );
}

#[test]
fn given_mapping_when_writing_then_emits_depth_first_children_before_text() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let writer = XmlConfigurationWriter::with_factory(options_without_comment(), factory.clone());
    let data = config_map(&[("a", "x"), ("a:b", "y"), ("c", "z")]);

    // Act
    writer.render(&data).unwrap();

    // Assert
    assert_eq!(
        factory.calls(),
        vec![
            Call::StartDocument,
            Call::Start("configuration".into()),
            Call::Start("a".into()),
            Call::Start("b".into()),
            Call::Text("y".into()),
            Call::End("b".into()),
            Call::Text("x".into()),
            Call::End("a".into()),
            Call::Start("c".into()),
            Call::Text("z".into()),
            Call::End("c".into()),
            Call::End("configuration".into()),
            Call::EndDocument,
        ]
    );
}

#[test]
fn given_custom_format_when_writing_then_factory_receives_it() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let options = WriterOptions {
        format: FormatOptions {
            indent_char: '\t',
            indent_size: 1,
            ..FormatOptions::default()
        },
        ..options_without_comment()
    };
    let writer = XmlConfigurationWriter::with_factory(options, factory.clone());

    // Act
    writer.render(&ConfigMap::new()).unwrap();

    // Assert
    let format = factory.last_format.lock().unwrap().clone().unwrap();
    assert_eq!(format.indent_char, '\t');
    assert_eq!(format.indent_size, 1);
}

#[test]
fn given_multiline_value_when_writing_then_newlines_are_normalized() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let options = WriterOptions {
        format: FormatOptions {
            newline: "\r\n".into(),
            ..FormatOptions::default()
        },
        ..options_without_comment()
    };
    let writer = XmlConfigurationWriter::with_factory(options, factory.clone());

    // Act
    writer
        .render(&config_map(&[("motd", "line1\nline2\rline3")]))
        .unwrap();

    // Assert
    assert!(factory
        .calls()
        .contains(&Call::Text("line1\r\nline2\r\nline3".into())));
}

#[test]
fn given_newline_handling_none_when_writing_then_text_is_unchanged() {
    let factory = Arc::new(RecordingFactory::default());
    let options = WriterOptions {
        format: FormatOptions {
            newline_handling: NewlineHandling::None,
            newline: "\r\n".into(),
            ..FormatOptions::default()
        },
        ..options_without_comment()
    };
    let writer = XmlConfigurationWriter::with_factory(options, factory.clone());

    writer.render(&config_map(&[("motd", "a\nb")])).unwrap();

    assert!(factory.calls().contains(&Call::Text("a\nb".into())));
}

#[test]
fn given_absent_data_when_writing_then_invalid_argument() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let writer = XmlConfigurationWriter::with_factory(WriterOptions::default(), factory.clone());
    let mut buf = Vec::new();
    let dest: &mut dyn Write = &mut buf;

    // Act
    let result = writer.write(Some(dest), None);

    // Assert
    assert!(matches!(result, Err(ApplicationError::InvalidArgument(_))));
    assert_eq!(factory.created(), 0);
    assert!(buf.is_empty());
}

#[test]
fn given_absent_stream_when_writing_then_invalid_argument() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let writer = XmlConfigurationWriter::with_factory(WriterOptions::default(), factory.clone());

    // Act
    let result = writer.write(None, Some(&ConfigMap::new()));

    // Assert
    assert!(matches!(result, Err(ApplicationError::InvalidArgument(_))));
    assert_eq!(factory.created(), 0);
}

#[test]
fn given_factory_cannot_create_writer_when_writing_then_invalid_argument() {
    let writer = XmlConfigurationWriter::with_factory(WriterOptions::default(), Arc::new(BrokenFactory));

    let result = writer.render(&ConfigMap::new());

    assert!(matches!(result, Err(ApplicationError::InvalidArgument(_))));
}

#[test]
fn given_malformed_key_when_writing_then_domain_error_before_output() {
    // Arrange
    let factory = Arc::new(RecordingFactory::default());
    let writer = XmlConfigurationWriter::with_factory(WriterOptions::default(), factory.clone());

    // Act
    let result = writer.render(&config_map(&[("a::b", "1")]));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Domain(_))));
    assert!(factory.calls().is_empty());
}

#[test]
fn given_unchanged_mapping_when_rendering_twice_then_output_is_identical() {
    // Arrange
    let writer = XmlConfigurationWriter::new(options_without_comment());
    let data = config_map(&[("a", "1"), ("a:b", "2"), ("c:d:e", "3")]);

    // Act
    let first = writer.render(&data).unwrap();
    let second = writer.render(&data).unwrap();

    // Assert
    assert_eq!(first, second);
}

#[test]
fn given_comment_enabled_when_rendering_twice_then_only_comment_may_differ() {
    let writer = XmlConfigurationWriter::default();
    let data = config_map(&[("a:b", "1")]);

    let strip = |bytes: Vec<u8>| {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .filter(|l| !l.starts_with("<!--"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    assert_eq!(
        strip(writer.render(&data).unwrap()),
        strip(writer.render(&data).unwrap())
    );
}

#[test]
fn given_serializer_and_xml_writer_when_used_standalone_then_writes_tree() {
    // Arrange
    let tree = TreeBuilder::new("settings")
        .build(&config_map(&[("k", "v")]))
        .unwrap();
    let serializer = DocumentSerializer::new(false, FormatOptions::default());
    let mut out = XmlElementWriter::new(Vec::new(), serializer.format()).unwrap();

    // Act
    serializer.serialize(&tree, &mut out).unwrap();

    // Assert
    let xml = String::from_utf8(out.into_inner()).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<settings>\n  <k>v</k>\n</settings>"));
}
