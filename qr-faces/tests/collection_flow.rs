use qr_faces::{
    derive_digest, identity_from_digest, name_from_digest, CaptureLoop, CollectionStore,
    FaceCollector, FaceRules, FrameTicker, FsBackend, GameConfig, LineSource, RawTextDecoder,
    catalog::NAMES,
};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::io::Cursor;
use tempdir::TempDir;

struct Immediate;

impl FrameTicker for Immediate {
    fn wait_for_tick(&mut self) {}
}

fn open(dir: &TempDir, seed: u64) -> FaceCollector<FsBackend, Pcg64Mcg> {
    FaceCollector::open(
        CollectionStore::new(FsBackend::new(dir.path())),
        Pcg64Mcg::seed_from_u64(seed),
        &GameConfig::default(),
    )
}

#[test]
fn hello_fixture_end_to_end() {
    let digest = derive_digest("HELLO");
    assert_eq!(
        digest.to_string(),
        "3733cd977ff8eb18b987357e22ced99f46097f31ecb239e878ae63760e83e4d5"
    );
    let index = (digest.as_bytes()[0] as usize * 256 + digest.as_bytes()[1] as usize) % NAMES.len();
    assert_eq!(name_from_digest(&digest), NAMES[index]);

    let face = identity_from_digest(&digest, &FaceRules::default());
    assert_eq!(face.color, "#3733cd");
}

#[test]
fn collection_survives_restart() {
    let dir = TempDir::new("qr-faces-flow").unwrap();
    {
        let mut collector = open(&dir, 1);
        let mut source = LineSource::new(Cursor::new("HELLO\nWORLD\n\nHELLO\n"));
        collector.start_capture(&mut source).unwrap();
        CaptureLoop::new(Immediate)
            .auto_collect(true)
            .run(&mut collector, &mut source, &mut RawTextDecoder, |_| {})
            .unwrap();
        assert_eq!(collector.collection().len(), 3);
    }

    let mut collector = open(&dir, 2);
    let names: Vec<_> = collector.collection().iter().map(|f| f.name.clone()).collect();
    assert_eq!(names[0], names[2]);
    assert_eq!(names[0], name_from_digest(&derive_digest("HELLO")));
    assert_eq!(names[1], name_from_digest(&derive_digest("WORLD")));

    assert!(collector.reset(&mut |_: &str| true).unwrap());
    assert!(open(&dir, 3).collection().is_empty());
}

#[test]
fn same_code_same_face_across_sessions() {
    let dir = TempDir::new("qr-faces-flow").unwrap();
    let a = open(&dir, 10).scan("HELLO").clone();
    let b = open(&dir, 20).scan("HELLO").clone();
    assert_eq!(a, b);
}
