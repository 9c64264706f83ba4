#![allow(dead_code)]

use evacplan::draw::color::BLACK;
use evacplan::draw::{MarkerKind, MarkerSymbol, ShapeKind, ShapeStyle, Shape, Symbol, WallSymbol};
use evacplan::geometry::Point;
use evacplan::project::Project;
use lopdf::content::Content;
use lopdf::{Document, Object, Stream, dictionary};

/// Minimal PDF with `count` pages sharing one MediaBox.
pub fn pdf_with_pages(count: usize, width: i64, height: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..count)
        .map(|_| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, b"0 g\n".to_vec()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })
            .into()
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count as i64,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

/// Operators of the first page's combined content streams.
pub fn first_page_operators(pdf: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(pdf).expect("load exported pdf");
    let (_, page_id) = doc.get_pages().into_iter().next().expect("first page");
    let raw = doc.get_page_content(page_id).expect("page content");
    Content::decode(&raw)
        .expect("decode content")
        .operations
        .into_iter()
        .map(|op| op.operator)
        .collect()
}

pub fn page_count(pdf: &[u8]) -> usize {
    Document::load_mem(pdf).expect("load pdf").get_pages().len()
}

/// A small office plan: one exit, one wall, one outline.
pub fn sample_project() -> Project {
    let mut project = Project::new("Office");
    project.symbols.push(Symbol::Marker(MarkerSymbol::new(
        MarkerKind::Exit,
        Point::new(100.0, 50.0),
    )));
    project.symbols.push(Symbol::Wall(WallSymbol::new(
        Point::new(10.0, 10.0),
        Point::new(200.0, 10.0),
        5.0,
    )));
    project.shapes.push(Shape::new(ShapeKind::Rectangle {
        start: Point::new(20.0, 20.0),
        end: Point::new(80.0, 60.0),
        style: ShapeStyle::stroked(BLACK, 2.0),
    }));
    project
}
