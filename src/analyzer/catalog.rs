use crate::analyzer::categorizer::{CategoryTag, categorize};
use serde::Serialize;

/// A real or fictional object whose weight is used as a yardstick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceItem {
    pub name: &'static str,
    pub plural_name: &'static str,
    /// Weight in pounds.
    pub weight: f64,
    /// Authored category; `None` means the category is derived from the name.
    pub category: Option<CategoryTag>,
}

impl ReferenceItem {
    pub fn resolved_category(&self) -> CategoryTag {
        self.category.unwrap_or_else(|| categorize(self.name))
    }

    pub fn display_name(&self, count: u32) -> &'static str {
        if count == 1 {
            self.name
        } else {
            self.plural_name
        }
    }
}

const fn item(
    name: &'static str,
    plural_name: &'static str,
    weight: f64,
    category: Option<CategoryTag>,
) -> ReferenceItem {
    ReferenceItem {
        name,
        plural_name,
        weight,
        category,
    }
}

pub fn catalog() -> &'static [ReferenceItem] {
    CATALOG
}

/// Resolves the candidate set for a category allow-list.
///
/// An empty list means every item. A list that matches nothing also yields
/// every item, so callers always have something to compare against.
pub fn filter_by_categories<'a>(
    items: &'a [ReferenceItem],
    allowed: &[CategoryTag],
) -> Vec<&'a ReferenceItem> {
    if allowed.is_empty() {
        return items.iter().collect();
    }

    let filtered = items
        .iter()
        .filter(|item| allowed.contains(&item.resolved_category()))
        .collect::<Vec<_>>();

    if filtered.is_empty() {
        items.iter().collect()
    } else {
        filtered
    }
}

// Ordered by ascending weight.
static CATALOG: &[ReferenceItem] = &[
    item("chihuahua", "chihuahuas", 4.0, None),
    item("Tribble", "Tribbles", 4.4, None),
    item("Facehugger", "Facehuggers", 5.0, None),
    item("Master Sword", "Master Swords", 6.6, None),
    item("Hylian Shield", "Hylian Shields", 8.0, None),
    item("house cat", "house cats", 12.0, None),
    item("Captain America's shield", "Captain America's shields", 12.0, None),
    item("Pikachu", "Pikachus", 13.2, None),
    item("bowling ball", "bowling balls", 14.0, Some(CategoryTag::Objects)),
    item("Bag of Holding", "Bags of Holding", 15.0, None),
    item("bicycle", "bicycles", 20.0, None),
    item("car tire", "car tires", 22.0, None),
    item("Corgi", "Corgis", 27.0, None),
    item("gold bar", "gold bars", 27.4, None),
    item("Yoda", "Yodas", 29.0, None),
    item("toddler", "toddlers", 30.0, None),
    item("Velociraptor", "Velociraptors", 33.0, None),
    item("microwave oven", "microwave ovens", 35.0, None),
    item("Mjolnir", "Mjolnirs", 42.3, None),
    item("Olympic barbell", "Olympic barbells", 45.0, None),
    item("Golden Retriever", "Golden Retrievers", 65.0, None),
    item("R2-D2", "R2-D2 units", 70.0, None),
    item("Hobbit", "Hobbits", 80.0, None),
    item("toilet", "toilets", 96.0, None),
    item("Creeper", "Creepers", 100.0, None),
    item("sofa", "sofas", 100.0, None),
    item("average person", "average persons", 150.0, None),
    item("washing machine", "washing machines", 170.0, None),
    item("Sputnik 1", "Sputnik 1 replicas", 184.0, None),
    item("Charizard", "Charizards", 199.5, None),
    item("anvil", "anvils", 200.0, None),
    item("Direwolf", "Direwolves", 200.0, None),
    item("Enderman", "Endermen", 200.0, None),
    item("Iron Man Mark 50 suit", "Iron Man Mark 50 suits", 225.0, None),
    item("giant panda", "giant pandas", 230.0, None),
    item("NFL linebacker", "NFL linebackers", 245.0, None),
    item("Chewbacca", "Chewbaccas", 247.0, None),
    item("Klingon warrior", "Klingon warriors", 250.0, None),
    item("refrigerator", "refrigerators", 250.0, None),
    item("Mewtwo", "Mewtwos", 269.0, None),
    item("Darth Vader", "Darth Vaders", 300.0, None),
    item("Xenomorph", "Xenomorphs", 300.0, None),
    item("Predator (Yautja)", "Predators (Yautja)", 300.0, None),
    item("Mimic", "Mimics", 300.0, None),
    item("jukebox", "jukeboxes", 300.0, None),
    item("sumo wrestler", "sumo wrestlers", 350.0, None),
    item("motorcycle", "motorcycles", 400.0, None),
    item("T-800 Terminator", "T-800 Terminators", 400.0, None),
    item("Hagrid", "Hagrids", 400.0, None),
    item("The Mountain (Gregor Clegane)", "Mountains (Gregor Clegane)", 420.0, None),
    item("astronaut in a spacesuit", "astronauts in spacesuits", 430.0, None),
    item("Rayquaza", "Rayquazas", 455.2, None),
    item("Onix", "Onixes", 463.0, None),
    item("Lugia", "Lugias", 476.2, None),
    item("Bigfoot", "Bigfoots", 500.0, None),
    item("Gyarados", "Gyarados", 518.1, None),
    item("grizzly bear", "grizzly bears", 600.0, None),
    item("Krogan battlemaster", "Krogan battlemasters", 700.0, None),
    item("vending machine", "vending machines", 800.0, None),
    item("Wailord", "Wailords", 877.4, None),
    item("Steelix", "Steelixes", 881.8, None),
    item("golf cart", "golf carts", 900.0, None),
    item("Thanos", "Thanoses", 985.0, None),
    item("grand piano", "grand pianos", 1_000.0, None),
    item("polar bear", "polar bears", 1_000.0, None),
    item("Master Chief in Mjolnir armor", "Master Chiefs in Mjolnir armor", 1_000.0, None),
    item("Space Marine in power armor", "Space Marines in power armor", 1_000.0, None),
    item("Tauntaun", "Tauntauns", 1_000.0, None),
    item("Buckbeak", "Buckbeaks", 1_000.0, None),
    item("unicorn", "unicorns", 1_000.0, None),
    item("Snorlax", "Snorlaxes", 1_014.1, None),
    item("horse", "horses", 1_100.0, None),
    item("Epona", "Eponas", 1_100.0, None),
    item("Lynel", "Lynels", 1_200.0, None),
    item("Metagross", "Metagrosses", 1_212.5, None),
    item("Hulk", "Hulks", 1_400.0, None),
    item("dairy cow", "dairy cows", 1_500.0, None),
    item("Gelatinous Cube", "Gelatinous Cubes", 1_500.0, None),
    item("Owlbear", "Owlbears", 1_500.0, None),
    item("Voyager 1 probe", "Voyager 1 probes", 1_592.0, None),
    item("smart car", "smart cars", 1_800.0, None),
    item("Curiosity Mars rover", "Curiosity Mars rovers", 1_982.0, None),
    item("American bison", "American bisons", 2_000.0, None),
    item("Alien Queen", "Alien Queens", 2_000.0, None),
    item("Iron Golem", "Iron Golems", 2_000.0, None),
    item("Shelob", "Shelobs", 2_000.0, None),
    item("Liberty Bell", "Liberty Bells", 2_080.0, None),
    item("Groudon", "Groudons", 2_094.4, None),
    item("TARDIS", "TARDISes", 2_200.0, None),
    item("Cosmoem", "Cosmoems", 2_204.4, None),
    item("Titanoboa", "Titanoboas", 2_500.0, None),
    item("giraffe", "giraffes", 2_600.0, None),
    item("Mini Cooper", "Mini Coopers", 2_700.0, None),
    item("Jabba the Hutt", "Jabbas the Hutt", 3_000.0, None),
    item("hippopotamus", "hippopotamuses", 3_300.0, None),
    item("Tesla Model 3", "Tesla Model 3s", 3_900.0, None),
    item("great white shark", "great white sharks", 4_000.0, None),
    item("Beholder", "Beholders", 4_000.0, None),
    item("Iron Throne", "Iron Thrones", 4_000.0, None),
    item("Ford F-150 pickup", "Ford F-150 pickups", 4_700.0, None),
    item("white rhinoceros", "white rhinoceroses", 5_000.0, None),
    item("Hinox", "Hinoxes", 5_000.0, None),
    item("Humvee", "Humvees", 5_200.0, None),
    item("Batmobile", "Batmobiles", 5_600.0, None),
    item("Warthog", "Warthogs", 6_600.0, None),
    item("shipping container", "shipping containers", 8_000.0, None),
    item("Power Loader", "Power Loaders", 8_000.0, None),
    item("Optimus Prime", "Optimus Primes", 8_600.0, None),
    item("Balrog", "Balrogs", 9_000.0, None),
    item("ambulance", "ambulances", 10_000.0, None),
    item("Hungarian Horntail", "Hungarian Horntails", 10_000.0, None),
    item("orca", "orcas", 12_000.0, None),
    item("wrecking ball", "wrecking balls", 12_000.0, None),
    item("African elephant", "African elephants", 13_000.0, None),
    item("AT-ST walker", "AT-ST walkers", 13_000.0, None),
    item("Treebeard", "Treebeards", 15_000.0, None),
    item("Spinosaurus", "Spinosauruses", 16_000.0, None),
    item("Tyrannosaurus rex", "Tyrannosaurus rexes", 18_000.0, Some(CategoryTag::Animals)),
    item("Triceratops", "Triceratopses", 20_000.0, None),
    item("Sarlacc", "Sarlaccs", 20_000.0, None),
    item("X-wing starfighter", "X-wing starfighters", 22_000.0, None),
    item("Hubble Space Telescope", "Hubble Space Telescopes", 24_500.0, None),
    item("school bus", "school buses", 25_000.0, None),
    item("Knight Bus", "Knight Buses", 25_000.0, None),
    item("SpaceX Dragon capsule", "SpaceX Dragon capsules", 26_700.0, None),
    item("M35 Mako", "M35 Makos", 27_000.0, None),
    item("Ender Dragon", "Ender Dragons", 30_000.0, None),
    item("Big Ben's Great Bell", "Great Bells of Big Ben", 30_300.0, None),
    item("Apollo Lunar Module", "Apollo Lunar Modules", 33_500.0, None),
    item("semi truck", "semi trucks", 35_000.0, None),
    item("Drogon", "Drogons", 40_000.0, None),
    item("Sentinel", "Sentinels", 40_000.0, None),
    item("Hunter-Killer aerial", "Hunter-Killer aerials", 40_000.0, None),
    item("F-22 Raptor", "F-22 Raptors", 43_000.0, None),
    item("Mumak (Oliphaunt)", "Mumakil (Oliphaunts)", 60_000.0, None),
    item("humpback whale", "humpback whales", 66_000.0, None),
    item("Quinjet", "Quinjets", 80_000.0, None),
    item("Gundam RX-78-2", "Gundam RX-78-2s", 95_000.0, None),
    item("Pelican dropship", "Pelican dropships", 100_000.0, None),
    item("Megalodon", "Megalodons", 100_000.0, None),
    item("Brachiosaurus", "Brachiosauruses", 120_000.0, None),
    item("M1 Abrams tank", "M1 Abrams tanks", 136_000.0, None),
    item(
        "Leman Russ battle tank",
        "Leman Russ battle tanks",
        140_000.0,
        Some(CategoryTag::Warhammer40k),
    ),
    item("Scorpion tank", "Scorpion tanks", 146_000.0, None),
    item("luxury yacht", "luxury yachts", 150_000.0, None),
    item("Land Raider", "Land Raiders", 154_000.0, None),
    item("Argentinosaurus", "Argentinosauruses", 200_000.0, None),
    item("Millennium Falcon", "Millennium Falcons", 220_000.0, None),
    item("Tarrasque", "Tarrasques", 260_000.0, None),
    item("King Kong", "King Kongs", 316_000.0, None),
    item("Smaug", "Smaugs", 320_000.0, None),
    item("blue whale", "blue whales", 330_000.0, None),
    item("locomotive", "locomotives", 400_000.0, None),
    item("Boeing 747", "Boeing 747s", 412_000.0, None),
    item("Statue of Liberty", "Statues of Liberty", 450_000.0, None),
    item("Hindenburg zeppelin", "Hindenburg zeppelins", 474_000.0, None),
    item("Baneblade", "Baneblades", 650_000.0, None),
    item("International Space Station", "International Space Stations", 925_000.0, None),
    item("lighthouse", "lighthouses", 1_200_000.0, None),
    item("AT-AT walker", "AT-AT walkers", 1_200_000.0, None),
    item("Sandcrawler", "Sandcrawlers", 1_400_000.0, None),
    item("Thresher Maw", "Thresher Maws", 2_200_000.0, None),
    item("Gipsy Danger jaeger", "Gipsy Danger jaegers", 3_960_000.0, None),
    item("Space Shuttle stack", "Space Shuttle stacks", 4_500_000.0, None),
    item("Saturn V rocket", "Saturn V rockets", 6_500_000.0, None),
    item("SpaceX Starship", "SpaceX Starships", 1.1e7, None),
    item("Warlord Titan", "Warlord Titans", 1.1e7, None),
    item("Eiffel Tower", "Eiffel Towers", 2.2e7, None),
    item("Galactus", "Galactuses", 2.2e7, None),
    item("Leaning Tower of Pisa", "Leaning Towers of Pisa", 3.2e7, None),
    item("Ohio-class submarine", "Ohio-class submarines", 3.7e7, None),
    item("Divine Beast Vah Ruta", "Divine Beasts Vah Ruta", 4.4e7, None),
    item("Covenant Scarab", "Covenant Scarabs", 8.1e7, None),
    item("Titanic", "Titanics", 1.05e8, None),
    item("USCSS Nostromo", "USCSS Nostromos", 1.4e8, None),
    item("Washington Monument", "Washington Monuments", 1.8e8, None),
    item("Godzilla", "Godzillas", 1.8e8, Some(CategoryTag::Fictional)),
    item("Helicarrier", "Helicarriers", 1.9e8, None),
    item("SSV Normandy SR-2", "SSV Normandy SR-2s", 1.9e8, None),
    item("Nimitz-class aircraft carrier", "Nimitz-class aircraft carriers", 2.0e8, None),
    item("USS Sulaco", "USS Sulacos", 2.6e8, Some(CategoryTag::Alien)),
    item("Imperator Titan", "Imperator Titans", 4.4e8, None),
    item("Klingon Bird-of-Prey", "Klingon Birds-of-Prey", 4.9e8, None),
    item("Hogwarts Castle", "Hogwarts Castles", 5.0e8, None),
    item("Empire State Building", "Empire State Buildings", 7.3e8, None),
    item("Golden Gate Bridge", "Golden Gate Bridges", 8.87e8, None),
    item("Burj Khalifa", "Burj Khalifas", 1.1e9, None),
    item("Colosseum", "Colosseums", 2.2e9, None),
    item("Pillar of Autumn", "Pillars of Autumn", 2.2e9, None),
    item("Sovereign (Reaper)", "Sovereigns (Reapers)", 4.4e9, None),
    item("Romulan Warbird", "Romulan Warbirds", 9.5e9, None),
    item("USS Enterprise-D", "USS Enterprise-Ds", 1.09e10, None),
    item("Great Pyramid of Giza", "Great Pyramids of Giza", 1.3e10, None),
    item("Hoover Dam", "Hoover Dams", 1.32e10, None),
    item("Imperial Star Destroyer", "Imperial Star Destroyers", 8.8e10, None),
    item("Three Gorges Dam", "Three Gorges Dams", 1.4e11, None),
    item("asteroid Bennu", "asteroid Bennus", 1.6e11, None),
    item("Great Wall of China", "Great Walls of China", 1.3e12, None),
    item("Borg Cube", "Borg Cubes", 2.0e13, None),
    item("Mass Relay", "Mass Relays", 3.2e13, None),
    item("Super Star Destroyer Executor", "Super Star Destroyer Executors", 2.2e14, None),
    item("Halley's Comet", "Halley's Comets", 4.85e14, None),
    item("Deimos (moon of Mars)", "Deimos moons", 3.3e15, None),
    item("Citadel", "Citadels", 7.1e15, None),
    item("Phobos (moon of Mars)", "Phobos moons", 2.35e16, None),
    item("Halo ring (Installation 04)", "Halo rings", 7.2e18, None),
    item("Death Star", "Death Stars", 1.3e19, None),
];
