//! Built-in demo corpus: short facts about animals and cities.

use vectra_core::types::StoreRequest;

pub const ANIMALS_CATEGORY: &str = "animals";
pub const CITIES_CATEGORY: &str = "cities";

/// `(content, description)` pairs stored under [`ANIMALS_CATEGORY`].
pub const ANIMALS: &[(&str, &str)] = &[
    ("Lions are majestic big cats that live in African savannas and hunt in prides", "African lion description"),
    ("Elephants are the largest land animals with remarkable memory and intelligence", "Elephant characteristics"),
    ("Tigers are solitary hunters with distinctive orange and black stripes", "Tiger hunting behavior"),
    ("Dolphins are highly intelligent marine mammals known for their playful behavior", "Dolphin intelligence"),
    ("Wolves live in packs with complex social hierarchies and communication", "Wolf pack dynamics"),
    ("Bears are powerful omnivores that hibernate during winter months", "Bear hibernation facts"),
    ("Gorillas are gentle giants and our closest relatives after chimpanzees", "Gorilla behavior"),
    ("Cheetahs are the fastest land animals reaching speeds of 70 mph", "Cheetah speed"),
    ("Pandas primarily eat bamboo and are native to central China", "Panda diet"),
    ("Kangaroos are marsupials that carry their young in pouches", "Kangaroo reproduction"),
    ("Eagles are powerful birds of prey with exceptional eyesight", "Eagle vision"),
    ("Penguins are flightless birds adapted to life in cold Antarctic waters", "Penguin adaptation"),
    ("Owls are nocturnal hunters with silent flight and rotating heads", "Owl hunting abilities"),
    ("Parrots are colorful birds known for mimicking human speech", "Parrot intelligence"),
    ("Hummingbirds are tiny birds that can hover and fly backwards", "Hummingbird flight"),
    ("Sharks are ancient predators that have existed for over 400 million years", "Shark evolution"),
    ("Whales are massive marine mammals that communicate through songs", "Whale communication"),
    ("Octopuses have eight arms and remarkable problem-solving abilities", "Octopus intelligence"),
    ("Sea turtles migrate thousands of miles to return to their birthplace", "Sea turtle migration"),
    ("Coral reefs are home to thousands of marine species", "Coral reef ecosystem"),
    ("Crocodiles are ancient reptiles that have barely changed since dinosaur times", "Crocodile evolution"),
    ("Chameleons can change color and have independently moving eyes", "Chameleon abilities"),
    ("Frogs undergo metamorphosis from tadpoles to adults", "Frog lifecycle"),
    ("Snakes use heat-sensing pits to detect warm-blooded prey", "Snake senses"),
    ("Komodo dragons are the largest living lizards with venomous bites", "Komodo dragon facts"),
];

/// `(content, description)` pairs stored under [`CITIES_CATEGORY`].
pub const CITIES: &[(&str, &str)] = &[
    ("New York City is a global hub for finance, arts, and culture with iconic skyscrapers", "NYC overview"),
    ("Tokyo is the world's most populous metropolitan area blending tradition and technology", "Tokyo description"),
    ("Paris is the City of Light known for the Eiffel Tower and world-class museums", "Paris landmarks"),
    ("London is a historic city with royal palaces and modern financial districts", "London features"),
    ("Dubai has transformed from a desert town to a futuristic metropolis", "Dubai development"),
    ("Singapore is a clean and efficient city-state with diverse cultural influences", "Singapore culture"),
    ("Sydney features the iconic Opera House and beautiful harbors", "Sydney architecture"),
    ("Rome is the Eternal City with ancient ruins and Renaissance art", "Rome history"),
    ("Barcelona combines modernist architecture with Mediterranean beaches", "Barcelona design"),
    ("Amsterdam is famous for its canals, cycling culture, and historic buildings", "Amsterdam character"),
    ("Shanghai is China's largest city with stunning modern architecture", "Shanghai skyline"),
    ("Hong Kong is a vibrant city where East meets West", "Hong Kong culture"),
    ("Seoul is a high-tech city with ancient palaces and K-pop culture", "Seoul modernization"),
    ("Bangkok is known for ornate temples and vibrant street life", "Bangkok temples"),
    ("Mumbai is India's financial capital and Bollywood's home", "Mumbai entertainment"),
    ("Los Angeles is the entertainment capital with Hollywood and beaches", "LA entertainment"),
    ("San Francisco is famous for the Golden Gate Bridge and tech innovation", "SF technology"),
    ("Chicago features stunning architecture and deep-dish pizza", "Chicago architecture"),
    ("Miami is a tropical city known for Art Deco and Latin culture", "Miami culture"),
    ("Toronto is a multicultural city with diverse neighborhoods", "Toronto diversity"),
    ("Berlin is a city of history, art, and cutting-edge nightlife", "Berlin arts"),
    ("Vienna is the city of music with grand imperial architecture", "Vienna music"),
    ("Prague features Gothic spires and medieval old town charm", "Prague architecture"),
    ("Istanbul straddles Europe and Asia with Byzantine and Ottoman heritage", "Istanbul history"),
    ("Athens is the cradle of democracy with ancient Greek monuments", "Athens antiquity"),
];

/// Every sample as a TEXT store request, animals first.
pub fn sample_requests() -> Vec<StoreRequest> {
    let tagged = |items: &'static [(&'static str, &'static str)], category: &'static str| {
        items.iter().map(move |(content, description)| {
            StoreRequest::text(*content)
                .with_category(category)
                .with_description(*description)
        })
    };

    tagged(ANIMALS, ANIMALS_CATEGORY)
        .chain(tagged(CITIES, CITIES_CATEGORY))
        .collect()
}
