use std::{io::Cursor, path::Path};

#[test]
fn test_recognizes_frozen_graphs() {
    assert!(inceptor_tensorflow::is_frozen_graph(Path::new(
        "/data/models/tensorflow_inception_graph.pb"
    )));
    assert!(!inceptor_tensorflow::is_frozen_graph(Path::new("model.onnx")));
    assert!(!inceptor_tensorflow::is_frozen_graph(Path::new("pb")));
}

#[test]
fn test_rejects_garbage() {
    let result =
        inceptor_tensorflow::builder(Cursor::new(b"not a graph".to_vec())).build(5, &[224, 224, 3]);
    assert!(result.is_err());
}

mod simple {
    use inceptor_core::prelude::*;
    use prost::Message;
    use std::io::Cursor;
    use tract_tensorflow::tfpb::tensorflow::{attr_value, AttrValue, DataType, GraphDef, NodeDef};

    fn float_type() -> AttrValue {
        AttrValue {
            value: Some(attr_value::Value::Type(DataType::DtFloat as i32)),
            ..Default::default()
        }
    }

    fn node(name: &str, op: &str, input: Option<&str>, type_attr: &str) -> NodeDef {
        NodeDef {
            name: name.to_owned(),
            op: op.to_owned(),
            input: input.into_iter().map(str::to_owned).collect(),
            attr: [(type_attr.to_owned(), float_type())].into_iter().collect(),
            ..Default::default()
        }
    }

    /// `Placeholder("input") -> Softmax("softmax2") -> Identity("output")`,
    /// the tail of a frozen Inception graph.
    fn classifier_bytes() -> Vec<u8> {
        GraphDef {
            node: vec![
                node("input", "Placeholder", None, "dtype"),
                node("softmax2", "Softmax", Some("input"), "T"),
                node("output", "Identity", Some("softmax2"), "T"),
            ],
            ..Default::default()
        }
        .encode_to_vec()
    }

    #[test]
    fn test_load_simple() {
        let inferer = inceptor_tensorflow::builder(Cursor::new(classifier_bytes()))
            .build(5, &[1, 1, 3])
            .unwrap();

        assert_eq!(inferer.batch_size(), 5);
        assert_eq!(
            inferer.input_shapes(),
            &[("input".to_owned(), vec![1, 1, 3])]
        );
        assert_eq!(
            inferer.output_shapes(),
            &[("output".to_owned(), vec![1, 1, 3])]
        );
    }

    #[test]
    fn test_infer_simple() {
        let mut inferer = inceptor_tensorflow::builder(Cursor::new(classifier_bytes()))
            .build(5, &[1, 1, 3])
            .unwrap();

        let mut batch = BatchAssembler::new(5, 1, 1);
        batch
            .append(PixelGrid::uniform(1, 1, Pixel::new(0.5, -0.5, 0.0)))
            .unwrap();

        let matrix =
            invoker::run(&mut inferer, batch.assemble().unwrap(), "input", "output").unwrap();

        assert_eq!(matrix.rows(), 5);
        assert_eq!(matrix.classes(), 3);
        assert!(matrix
            .iter_rows()
            .flatten()
            .all(|p| *p > 0.0 && *p <= 1.0));
    }
}
