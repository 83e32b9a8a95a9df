//! Dimension codec and dimension compound sent in JoinGame.
//!
//! The codec is a registry snapshot: one overworld dimension type and the two
//! biomes the spawn region can reference (`plains` and `the_void`).

use bytes::Bytes;
use tinycraft_nbt::{NbtCompound, NbtError, NbtRoot, NbtTag};

use crate::chunk::VOID_BIOME;

pub const OVERWORLD: &str = "minecraft:overworld";
const DIMENSION_TYPE_REGISTRY: &str = "minecraft:dimension_type";
const BIOME_REGISTRY: &str = "minecraft:worldgen/biome";
const PLAINS_ID: i32 = 1;

fn compound<'a>(entries: impl IntoIterator<Item = (&'a str, NbtTag)>) -> NbtCompound {
    entries.into_iter().collect()
}

/// Element of the overworld dimension type.
pub fn overworld_dimension_type() -> NbtCompound {
    compound([
        ("piglin_safe", NbtTag::bool(false)),
        ("natural", NbtTag::bool(true)),
        ("ambient_light", NbtTag::Float(0.0)),
        ("infiniburn", NbtTag::string("minecraft:infiniburn_overworld")),
        ("respawn_anchor_works", NbtTag::bool(false)),
        ("has_skylight", NbtTag::bool(true)),
        ("bed_works", NbtTag::bool(true)),
        ("effects", NbtTag::string(OVERWORLD)),
        ("has_raids", NbtTag::bool(true)),
        ("logical_height", NbtTag::Int(256)),
        ("coordinate_scale", NbtTag::Double(1.0)),
        ("ultrawarm", NbtTag::bool(false)),
        ("has_ceiling", NbtTag::bool(false)),
    ])
}

fn biome(category: &str, precipitation: &str, temperature: f32, downfall: f32) -> NbtCompound {
    let mood_sound = compound([
        ("tick_delay", NbtTag::Int(6000)),
        ("offset", NbtTag::Double(2.0)),
        ("sound", NbtTag::string("minecraft:ambient.cave")),
        ("block_search_extent", NbtTag::Int(8)),
    ]);
    let effects = compound([
        ("sky_color", NbtTag::Int(7_907_327)),
        ("water_fog_color", NbtTag::Int(329_011)),
        ("fog_color", NbtTag::Int(12_638_463)),
        ("water_color", NbtTag::Int(4_159_204)),
        ("mood_sound", NbtTag::Compound(mood_sound)),
    ]);
    compound([
        ("precipitation", NbtTag::string(precipitation)),
        ("effects", NbtTag::Compound(effects)),
        ("depth", NbtTag::Float(0.125)),
        ("temperature", NbtTag::Float(temperature)),
        ("scale", NbtTag::Float(0.05)),
        ("downfall", NbtTag::Float(downfall)),
        ("category", NbtTag::string(category)),
    ])
}

fn registry_entry(name: &str, id: i32, element: NbtCompound) -> NbtTag {
    NbtTag::Compound(compound([
        ("name", NbtTag::string(name)),
        ("id", NbtTag::Int(id)),
        ("element", NbtTag::Compound(element)),
    ]))
}

fn registry(kind: &str, entries: Vec<NbtTag>) -> NbtTag {
    NbtTag::Compound(compound([
        ("type", NbtTag::string(kind)),
        ("value", NbtTag::List(entries)),
    ]))
}

/// Full dimension codec as an unnamed root compound.
pub fn dimension_codec() -> NbtRoot {
    NbtRoot::unnamed(compound([
        (
            DIMENSION_TYPE_REGISTRY,
            registry(
                DIMENSION_TYPE_REGISTRY,
                vec![registry_entry(OVERWORLD, 0, overworld_dimension_type())],
            ),
        ),
        (
            BIOME_REGISTRY,
            registry(
                BIOME_REGISTRY,
                vec![
                    registry_entry(
                        "minecraft:plains",
                        PLAINS_ID,
                        biome("plains", "rain", 0.8, 0.4),
                    ),
                    registry_entry(
                        "minecraft:the_void",
                        VOID_BIOME,
                        biome("none", "none", 0.5, 0.5),
                    ),
                ],
            ),
        ),
    ]))
}

/// Dimension the player spawns in: the overworld element on its own.
pub fn dimension() -> NbtRoot {
    NbtRoot::unnamed(overworld_dimension_type())
}

/// Encoded `(dimension_codec, dimension)` for JoinGame.
pub fn join_game_nbt() -> Result<(Bytes, Bytes), NbtError> {
    Ok((
        tinycraft_nbt::to_bytes(&dimension_codec())?,
        tinycraft_nbt::to_bytes(&dimension())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_lists_overworld() {
        let (codec, _) = join_game_nbt().unwrap();
        let root = tinycraft_nbt::read_nbt(&mut codec.clone()).unwrap();
        let dims = root.compound[DIMENSION_TYPE_REGISTRY].as_compound().unwrap();
        assert_eq!(dims["type"].as_string(), Some(DIMENSION_TYPE_REGISTRY));
        let entries = dims["value"].as_list().unwrap();
        assert_eq!(entries.len(), 1);
        let entry = entries[0].as_compound().unwrap();
        assert_eq!(entry["name"].as_string(), Some(OVERWORLD));
        assert_eq!(entry["id"].as_int(), Some(0));
    }

    #[test]
    fn codec_contains_void_biome() {
        let root = dimension_codec();
        let biomes = root.compound[BIOME_REGISTRY].as_compound().unwrap();
        let ids: Vec<i32> = biomes["value"]
            .as_list()
            .unwrap()
            .iter()
            .filter_map(|e| e.as_compound()?.get("id")?.as_int())
            .collect();
        assert!(ids.contains(&VOID_BIOME));
        assert!(ids.contains(&PLAINS_ID));
    }

    #[test]
    fn dimension_is_overworld_element() {
        let (_, dim) = join_game_nbt().unwrap();
        let root = tinycraft_nbt::read_nbt(&mut dim.clone()).unwrap();
        assert_eq!(root.name, "");
        assert_eq!(root.compound["logical_height"].as_int(), Some(256));
        assert_eq!(root.compound["natural"].as_byte(), Some(1));
    }
}
