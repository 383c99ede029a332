use dataview::{BigEndian, LittleEndian, SafetyMode, nbt};

#[macro_use]
extern crate afl;
extern crate dataview;

fn main() {
    fuzz!(|data: &[u8]| {
        if let Ok(container) = nbt::read_container::<BigEndian>(data) {
            if let Ok(bytes) = nbt::write_container::<BigEndian>(&container) {
                let decoded = nbt::read_container::<BigEndian>(&bytes)
                    .expect("encoded container must decode");
                let again = nbt::write_container::<BigEndian>(&decoded)
                    .expect("decoded container must encode");
                assert_eq!(again, bytes);
            }
            let _ = nbt::write_container::<LittleEndian>(&container.copy());
        }
        if let Ok(container) = nbt::read_container_with::<LittleEndian>(data, SafetyMode::NoDataCloned) {
            let _ = nbt::write_container::<LittleEndian>(&container);
            let _ = nbt::write_container::<BigEndian>(&container);
        }
    });
}
